use crate::io::FileType;
use crate::magnetism::Selection;
use crate::steps::Steps;
use crate::view::Supercell;
use anyhow::{anyhow, Result};
use clap::{crate_authors, Arg, ArgMatches, Command};

/// Create a container for dealing with clap and being able to test arg parsing
pub enum ClapApp {
    App,
}

impl ClapApp {
    /// Create and return the clap::Command
    pub fn get(&self) -> Command<'static> {
        Command::new("Local Magnetic Moment Analysis")
            .author(crate_authors!())
            .version(clap::crate_version!())
            .arg(Arg::new("file")
                .required(true)
                .index(1)
                .help("The file containing the local moments."))
            .arg(Arg::new("file type")
                .short('t')
                .long("type")
                .takes_value(true)
                .possible_values(["outcar", "npz"])
                .help("The file type of the local moments.")
                .long_help(
"The file type of the input file. If this is not supplied the type is infered
from the filename, files ending in .npz are read as NumPy archives and anything
else as OUTCAR."))
            .arg(Arg::new("steps")
                .short('s')
                .long("steps")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1")
                .help("The ionic steps to analyse.")
                .long_help(
"A single step (\"3\", \"-1\" for the last) or a range of steps in slice notation
(\"0:3\", \"2:\", \":\" for all steps). Steps count from zero."))
            .arg(Arg::new("selection")
                .short('S')
                .long("selection")
                .takes_value(true)
                .possible_values(["total", "spin", "orbital"])
                .default_value("total")
                .help("Which contribution of the moments to plot.")
                .long_help(
"Selects the spin or orbital contribution of the moments or their sum. Only
noncollinear calculations with LORBMOM = T distinguish them."))
            .arg(Arg::new("poscar")
                .short('p')
                .long("poscar")
                .takes_value(true)
                .help("The structure the moments belong to.")
                .long_help(
"A POSCAR or CONTCAR with the element names above the number of atoms. Needed
to write the view of the magnetic moments."))
            .arg(Arg::new("supercell")
                .short('c')
                .long("supercell")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("How often the cell is repeated in the view.")
                .long_help(
"Either a single integer used for all directions or three integers separated by
commas, ie. \"2\" or \"2,2,1\"."))
            .arg(Arg::new("dict")
                .long("dict")
                .takes_value(true)
                .help("Write the charges and moments as JSON to this file."))
            .arg(Arg::new("view")
                .long("view")
                .takes_value(true)
                .requires("poscar")
                .help("Write the structure and moment arrows as JSON to this file."))
            .arg(Arg::new("quiet")
                .short('q')
                .long("quiet")
                .takes_value(false)
                .help("Hide the progress bar."))
            .arg(Arg::new("verbose")
                .short('v')
                .long("verbose")
                .takes_value(false)
                .help("Log what is being read.")
                .long_help(
"Raises the log level to info. The RUST_LOG environment variable takes
precedence if it is set."))
    }
}

/// Holds the arguments passed to the program from the command-line
pub struct Args {
    pub file: String,
    pub file_type: FileType,
    pub steps: Steps,
    pub selection: Selection,
    pub poscar: Option<String>,
    pub supercell: Option<Supercell>,
    pub dict: Option<String>,
    pub view: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
}

impl Args {
    /// Initialises the structure from the command-line arguments.
    pub fn new(arguments: ArgMatches) -> Result<Self> {
        let file = arguments.value_of("file")
                            .map(String::from)
                            .ok_or_else(|| anyhow!("No file passed."))?;
        let file_type = match arguments.value_of("file type") {
            Some("npz") => FileType::Npz,
            Some(_) => FileType::Outcar,
            None => FileType::infer(&file),
        };
        let steps = arguments.value_of("steps")
                             .unwrap_or("-1")
                             .parse::<Steps>()?;
        let selection = arguments.value_of("selection")
                                 .unwrap_or("total")
                                 .parse::<Selection>()?;
        let supercell = arguments.value_of("supercell")
                                 .map(|s| s.parse::<Supercell>())
                                 .transpose()?;
        Ok(Self { file,
                  file_type,
                  steps,
                  selection,
                  poscar: arguments.value_of("poscar").map(String::from),
                  supercell,
                  dict: arguments.value_of("dict").map(String::from),
                  view: arguments.value_of("view").map(String::from),
                  quiet: arguments.is_present("quiet"),
                  verbose: arguments.is_present("verbose") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: Vec<&str>) -> Args {
        let app = ClapApp::App.get();
        Args::new(app.get_matches_from(argv)).unwrap()
    }

    #[test]
    fn clapapp_get() {
        let app = ClapApp::App.get();
        assert_eq!(app.get_name(), "Local Magnetic Moment Analysis")
    }

    #[test]
    fn argument_file() {
        let args = args(vec!["magmom", "OUTCAR"]);
        assert_eq!(args.file, String::from("OUTCAR"));
        assert_eq!(args.file_type, FileType::Outcar);
        assert_eq!(args.steps, Steps::Single(-1));
        assert_eq!(args.selection, Selection::Total);
        assert!(args.poscar.is_none());
        assert!(!args.quiet);
    }

    #[test]
    #[should_panic]
    fn argument_no_file() {
        let app = ClapApp::App.get();
        let _ = app.try_get_matches_from(vec!["magmom"])
                   .unwrap_or_else(|e| panic!("An error occurs: {}", e));
    }

    #[test]
    fn argument_file_type_infered_npz() {
        let args = args(vec!["magmom", "moments.npz"]);
        assert_eq!(args.file_type, FileType::Npz);
    }

    #[test]
    fn argument_file_type_npz() {
        let args = args(vec!["magmom", "moments.dat", "-t", "npz"]);
        assert_eq!(args.file_type, FileType::Npz);
    }

    #[test]
    fn argument_file_type_outcar() {
        let args = args(vec!["magmom", "moments.npz", "--type", "outcar"]);
        assert_eq!(args.file_type, FileType::Outcar);
    }

    #[test]
    #[should_panic]
    fn argument_file_type_not_type() {
        let app = ClapApp::App.get();
        let _ = app.try_get_matches_from(vec!["magmom", "OUTCAR", "-t", "chgcar"])
                   .unwrap_or_else(|e| panic!("An error occurs: {}", e));
    }

    #[test]
    fn argument_steps() {
        let args = args(vec!["magmom", "OUTCAR", "-s", "0:3"]);
        assert_eq!(args.steps, Steps::Slice(Some(0), Some(3)));
    }

    #[test]
    fn argument_steps_negative() {
        let args = args(vec!["magmom", "OUTCAR", "--steps", "-2"]);
        assert_eq!(args.steps, Steps::Single(-2));
    }

    #[test]
    fn argument_steps_bogus() {
        let app = ClapApp::App.get();
        let matches = app.get_matches_from(vec!["magmom", "OUTCAR", "-s", "a:b"]);
        assert!(Args::new(matches).is_err());
    }

    #[test]
    fn argument_selection() {
        let args = args(vec!["magmom", "OUTCAR", "-S", "orbital"]);
        assert_eq!(args.selection, Selection::Orbital);
    }

    #[test]
    #[should_panic]
    fn argument_selection_not_selection() {
        let app = ClapApp::App.get();
        let _ = app.try_get_matches_from(vec!["magmom", "OUTCAR", "-S", "bogus"])
                   .unwrap_or_else(|e| panic!("An error occurs: {}", e));
    }

    #[test]
    fn argument_supercell() {
        let args = args(vec!["magmom", "OUTCAR", "-c", "2,2,1"]);
        assert_eq!(args.supercell, Some(Supercell([2, 2, 1])));
    }

    #[test]
    fn argument_supercell_bogus() {
        let app = ClapApp::App.get();
        let matches = app.get_matches_from(vec!["magmom", "OUTCAR", "-c", "2,2"]);
        assert!(Args::new(matches).is_err());
    }

    #[test]
    fn argument_view_needs_poscar() {
        let app = ClapApp::App.get();
        assert!(app.try_get_matches_from(vec!["magmom", "OUTCAR", "--view",
                                              "view.json"])
                   .is_err());
        let args = args(vec!["magmom", "OUTCAR", "--view", "view.json", "-p",
                             "POSCAR"]);
        assert_eq!(args.view, Some(String::from("view.json")));
        assert_eq!(args.poscar, Some(String::from("POSCAR")));
    }

    #[test]
    fn argument_flags() {
        let args = args(vec!["magmom", "OUTCAR", "-q", "-v", "--dict",
                             "moments.json"]);
        assert!(args.quiet);
        assert!(args.verbose);
        assert_eq!(args.dict, Some(String::from("moments.json")));
    }
}
