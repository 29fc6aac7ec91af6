use ndarray::{ArrayD, ArrayView1, Axis, Ix1};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the total charge of every atom, one column per step.
///
/// * `total_charges`: [atom] for a single step or [step, atom] otherwise.
pub fn charges_table(total_charges: &ArrayD<f64>) -> String {
    let steps = match total_charges.ndim() {
        1 => total_charges.view().insert_axis(Axis(0)),
        _ => total_charges.view(),
    };
    let columns = steps.axis_iter(Axis(0))
                       .filter_map(|step| step.into_dimensionality::<Ix1>().ok())
                       .collect::<Vec<ArrayView1<f64>>>();
    let atoms = columns.first().map_or(0, |column| column.len());
    let mut table = format!("{:>6}", "#");
    if total_charges.ndim() == 1 {
        table.push_str(&format!(" {:>14}", "Charge"));
    } else {
        for step in 0..columns.len() {
            table.push_str(&format!(" {:>14}", format!("Step {}", step + 1)));
        }
    }
    let width = table.len();
    table.push('\n');
    table.push_str(&"-".repeat(width));
    for atom in 0..atoms {
        table.push_str(&format!("\n{:>6}", atom + 1));
        for column in columns.iter() {
            table.push_str(&format!(" {:>14.4}", column[atom]));
        }
    }
    table
}

/// Write the file
///
/// * `content`: The contents of the file as a String.
/// * `filename`: Where to write it.
pub fn write(content: String, filename: &Path) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};
    use std::fs;

    #[test]
    fn charges_table_single_step() {
        let table = charges_table(&arr1(&[12.681, 5.95]).into_dyn());
        let lines = table.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "     #         Charge");
        assert_eq!(lines[2], "     1        12.6810");
        assert_eq!(lines[3], "     2         5.9500");
    }

    #[test]
    fn charges_table_steps() {
        let charges = arr2(&[[1., 2.], [3., 4.], [5., 6.]]).into_dyn();
        let table = charges_table(&charges);
        let lines = table.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("Step 3"));
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(),
                   vec!["2", "2.0000", "4.0000", "6.0000"]);
    }

    #[test]
    fn write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moments.json");
        write(String::from("{}"), &path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
    }
}
