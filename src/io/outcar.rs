use crate::io::FileFormat;
use crate::progress::{Bar, HiddenBar, ProgressBar};
use crate::raw::RawMagnetism;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use ndarray::{s, Array4, ArrayViewMut2};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The OUTCAR written by VASP, the local moments are printed after every
/// ionic step if LORBIT is set.
pub struct Outcar {}

impl FileFormat for Outcar {
    fn read(&self, filename: &Path, visible_pbar: bool) -> Result<RawMagnetism> {
        info!("Reading local moments from {}", filename.display());
        let file = File::open(filename)
            .with_context(|| format!("Opening {}", filename.display()))?;
        let length = file.metadata()?.len();
        let pbar: Box<dyn ProgressBar> = match visible_pbar {
            true => Box::new(Bar::visible(length,
                                          100,
                                          format!("Reading {}: ",
                                                  filename.display()))),
            false => Box::new(HiddenBar {}),
        };
        parse(BufReader::new(file), pbar.as_ref())
            .with_context(|| format!("Parsing {}", filename.display()))
    }
}

/// Which table of the OUTCAR is currently read.
#[derive(Clone, Copy, Debug)]
enum Target {
    Charge,
    Magnetization(usize),
    Orbital(usize),
}

/// Where the parser is within the OUTCAR.
enum State {
    /// Looking for the title of a table.
    Searching,
    /// Found a title, waiting for the column labels.
    Labels(Target),
    /// Reading the rows of a table, one per atom.
    Rows(Target, Block),
}

/// One table, the values of every atom for the labeled orbitals.
#[derive(Debug, PartialEq)]
struct Block {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl Block {
    fn push(&mut self, row: &str) -> Result<()> {
        let values = row.split_whitespace()
                        .map(|v| v.parse::<f64>())
                        .collect::<Result<Vec<f64>, _>>()
                        .with_context(|| format!("Unparsable row: {}", row))?;
        if values.len() < self.labels.len() {
            bail!("Expected {} values in the row: {}", self.labels.len(), row);
        }
        self.values.push(values[..self.labels.len()].to_vec());
        Ok(())
    }
}

/// The tables of a single ionic step.
#[derive(Default)]
struct Step {
    charge: Option<Block>,
    magnetization: [Option<Block>; 3],
    orbital: [Option<Block>; 3],
}

impl Step {
    fn store(&mut self, target: Target, block: Block) {
        match target {
            Target::Charge => self.charge = Some(block),
            Target::Magnetization(i) => self.magnetization[i] = Some(block),
            Target::Orbital(i) => self.orbital[i] = Some(block),
        }
    }
}

/// The compiled expressions for the lines of the tables.
struct Patterns {
    title: Regex,
    labels: Regex,
    row: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        let title = r"^\s*(total charge|magnetization \(([xyz])\)|orbital moment \(([xyz])\))\s*$";
        Ok(Self { title: Regex::new(title)?,
                  labels: Regex::new(r"^#\s*of ion\s+(.*\S)\s*$")?,
                  row: Regex::new(r"^\s*\d+\s+(.*\S)\s*$")? })
    }

    fn title(&self, line: &str) -> Option<Target> {
        let captures = self.title.captures(line)?;
        let direction = |d: &str| match d {
            "x" => 0,
            "y" => 1,
            _ => 2,
        };
        if let Some(d) = captures.get(2) {
            Some(Target::Magnetization(direction(d.as_str())))
        } else if let Some(d) = captures.get(3) {
            Some(Target::Orbital(direction(d.as_str())))
        } else {
            Some(Target::Charge)
        }
    }
}

/// Reads the local moment tables of every ionic step. Every "total charge"
/// table starts a new step.
pub fn parse(reader: impl BufRead,
             progress: &dyn ProgressBar)
             -> Result<RawMagnetism> {
    let patterns = Patterns::new()?;
    let mut steps: Vec<Step> = vec![];
    let mut state = State::Searching;
    for line in reader.lines() {
        let line = line?;
        progress.add(line.len() + 1);
        state = match state {
            State::Searching => match patterns.title(&line) {
                Some(Target::Charge) => {
                    steps.push(Step::default());
                    State::Labels(Target::Charge)
                }
                Some(target) => State::Labels(target),
                None => State::Searching,
            },
            State::Labels(target) => {
                if let Some(captures) = patterns.labels.captures(&line) {
                    let labels = captures[1].split_whitespace()
                                            .filter(|l| *l != "tot")
                                            .map(String::from)
                                            .collect();
                    State::Rows(target, Block { labels,
                                                values: vec![] })
                } else if line.trim().is_empty() {
                    State::Labels(target)
                } else {
                    debug!("Table {:?} without column labels", target);
                    State::Searching
                }
            }
            State::Rows(target, mut block) => {
                if let Some(captures) = patterns.row.captures(&line) {
                    block.push(&captures[1])?;
                    State::Rows(target, block)
                } else if block.values.is_empty()
                          && line.trim_start().starts_with('-')
                {
                    State::Rows(target, block)
                } else {
                    store(&mut steps, target, block);
                    State::Searching
                }
            }
        };
    }
    if let State::Rows(target, block) = state {
        store(&mut steps, target, block);
    }
    assemble(steps)
}

fn store(steps: &mut [Step], target: Target, block: Block) {
    match steps.last_mut() {
        Some(step) => step.store(target, block),
        None => debug!("Skipping table {:?} before the first step", target),
    }
}

/// The tables every step has to contain.
#[derive(Debug, PartialEq)]
struct Layout {
    labels: Vec<String>,
    atoms: usize,
    components: usize,
    orbital: bool,
}

impl Layout {
    /// The layout of the step, None if the tables of the step do not fit
    /// together.
    fn of(step: &Step) -> Option<Self> {
        let charge = step.charge.as_ref()?;
        let present = |blocks: &[Option<Block>; 3]| {
            blocks.iter().map(Option::is_some).collect::<Vec<bool>>()
        };
        let components = match present(&step.magnetization).as_slice() {
            [false, false, false] => 1,
            [true, false, false] => 2,
            [true, true, true] => 4,
            _ => return None,
        };
        let atoms = charge.values.len();
        let spin_fits =
            step.magnetization.iter().flatten().all(|block| {
                block.labels == charge.labels && block.values.len() == atoms
            });
        let orbital_blocks = &step.orbital[..components - 1];
        let orbital = components > 1 && orbital_blocks.iter().all(Option::is_some);
        let orbital_fits = orbital_blocks.iter()
                                         .flatten()
                                         .all(|block| block.values.len() == atoms);
        if !(spin_fits && orbital_fits) {
            return None;
        }
        Some(Self { labels: charge.labels.clone(),
                    atoms,
                    components,
                    orbital })
    }
}

/// Combines the steps into the raw arrays. An incomplete last step, ie. of
/// a run that was stopped, is dropped.
fn assemble(mut steps: Vec<Step>) -> Result<RawMagnetism> {
    let layout = steps.first()
                      .and_then(Layout::of)
                      .context("No local moments found, please verify the LORBIT tag is set.")?;
    if let Some(i) = steps.iter()
                          .position(|step| Layout::of(step).as_ref() != Some(&layout))
    {
        if i + 1 != steps.len() {
            bail!("The local moments of step {} differ from the first step.",
                  i + 1);
        }
        warn!("Dropping the incomplete local moments of the last step.");
        steps.truncate(i);
    }
    debug!("Found local moments for {} steps in layout {:?}",
           steps.len(),
           layout);
    let shape = (steps.len(),
                 layout.components,
                 layout.atoms,
                 layout.labels.len());
    let mut spin_moments = Array4::zeros(shape);
    let mut orbital_moments = if layout.orbital {
        Some(Array4::zeros(shape))
    } else {
        None
    };
    for (i, step) in steps.iter().enumerate() {
        let spin_blocks = step.charge.iter().chain(step.magnetization.iter().flatten());
        for (c, block) in spin_blocks.take(layout.components).enumerate() {
            fill(spin_moments.slice_mut(s![i, c, .., ..]), block, &layout.labels);
        }
        if let Some(orbital_moments) = orbital_moments.as_mut() {
            let orbital_blocks = step.orbital.iter().flatten();
            for (c, block) in orbital_blocks.take(layout.components - 1)
                                            .enumerate()
            {
                fill(orbital_moments.slice_mut(s![i, c + 1, .., ..]),
                     block,
                     &layout.labels);
            }
        }
    }
    Ok(RawMagnetism::new(spin_moments, orbital_moments)?)
}

/// Copies a table into the [atom, orbital] target matching the columns by
/// their label, orbitals missing from the table stay zero.
fn fill(mut target: ArrayViewMut2<f64>, block: &Block, labels: &[String]) {
    for (j, label) in block.labels.iter().enumerate() {
        match labels.iter().position(|l| l == label) {
            Some(k) => {
                for (atom, values) in block.values.iter().enumerate() {
                    target[[atom, k]] = values[j];
                }
            }
            None => debug!("Ignoring the column {} of the table", label),
        }
    }
}
