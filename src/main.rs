use anyhow::{Context, Result};
use env_logger::Env;
use magmom::arguments::{Args, ClapApp};
use magmom::io::output;
use magmom::io::poscar::read_poscar;
use magmom::magnetism::Magnetism;
use std::path::Path;

fn main() -> Result<()> {
    // argument parsing
    let app = ClapApp::App.get();
    let args = Args::new(app.get_matches())?;
    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    // print splash
    println!("Local Magnetic Moment Analysis ({})", env!("CARGO_PKG_VERSION"));
    let file_type = args.file_type.format();
    let mut raw = file_type.read(Path::new(&args.file), !args.quiet)?;
    if let Some(poscar) = args.poscar.as_ref() {
        raw = raw.with_structure(read_poscar(Path::new(poscar))?);
    }
    let magnetism = Magnetism::from_data(&raw).steps(args.steps);
    println!("{}", magnetism.report()?);
    println!("{}", output::charges_table(&magnetism.total_charges()?));
    if let Some(dict) = args.dict.as_ref() {
        let content = serde_json::to_string_pretty(&magnetism.to_dict()?)?;
        output::write(content, Path::new(dict))
            .with_context(|| format!("Writing {}", dict))?;
    }
    if let Some(view) = args.view.as_ref() {
        let view_data = magnetism.to_view(args.selection, args.supercell)?;
        let content = serde_json::to_string_pretty(&view_data)?;
        output::write(content, Path::new(view))
            .with_context(|| format!("Writing {}", view))?;
    }
    Ok(())
}
