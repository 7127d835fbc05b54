use crate::compiler::settings::{Setting, Settings};
use crate::compiler::source::FileSource;
use crate::compiler::{CompilationUnit, Compiler};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of source files picked up from directories.
pub const SOURCE_EXTENSION: &str = "jack";

#[derive(Parser, Debug)]
#[clap(
    name = "jackc",
    version = "0.1",
    about = "Compile <INPUT> into a parse-tree trace (.xml) and VM code (.vm)"
)]
pub struct Opts {
    /// Source files, or directories to scan for .jack files
    #[clap(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write artifacts here instead of next to each source
    #[clap(long)]
    pub out_dir: Option<PathBuf>,

    /// Do not write the .xml parse-tree trace
    #[clap(long)]
    pub no_trace: bool,

    /// Do not write the .vm code
    #[clap(long)]
    pub no_vm: bool,

    /// Dump the token stream at debug level
    #[clap(long)]
    pub debug: bool,
}

impl Opts {
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();

        settings.set(Setting::EmitTrace, !self.no_trace);
        settings.set(Setting::EmitCode, !self.no_vm);
        settings.set(Setting::Debug, self.debug);

        settings
    }
}

/// Compile every unit named by the options.
///
/// Returns `Ok(false)` if at least one unit failed. Failed units are
/// reported and skipped; they never produce artifacts, and artifacts left
/// over from an earlier run are removed.
pub fn execute(opts: &Opts) -> anyhow::Result<bool> {
    let mut compiler = Compiler::with_settings(opts.settings());
    let mut all_compiled = true;

    for path in discover(&opts.inputs)? {
        let mut source = FileSource::new(path.clone());
        let artifacts = Artifacts::new(&path, opts.out_dir.as_deref())?;

        match compiler.compile(&mut source) {
            Ok(unit) => {
                let written = artifacts.write(&unit, &compiler)?;
                println!("{}: compiled {} -> {}", path.display(), unit.class_name, written.join(", "));
            }
            Err(e) => {
                log::debug!("{} failed: {}", path.display(), e);
                eprintln!("{}: compilation failed", path.display());
                compiler.print_error(&e);
                artifacts.remove()?;
                all_compiled = false;
            }
        }
    }

    Ok(all_compiled)
}

/// Expand directories into the `.jack` files they hold, sorted by name.
pub fn discover(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut units = vec![];

    for input in inputs {
        if input.is_dir() {
            let mut found = vec![];
            for entry in fs::read_dir(input)
                .with_context(|| format!("cannot read directory {}", input.display()))?
            {
                let path = entry?.path();
                if path.is_file() && has_source_extension(&path) {
                    found.push(path);
                }
            }
            found.sort();
            log::debug!("found {} units in {}", found.len(), input.display());
            units.extend(found);
        } else {
            units.push(input.clone());
        }
    }

    Ok(units)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == SOURCE_EXTENSION)
}

/// Where the outputs of one unit go: `<base>.xml` and `<base>.vm`, where
/// `<base>` is the source file name without its extension.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub trace: PathBuf,
    pub code: PathBuf,
}

impl Artifacts {
    pub fn new(source: &Path, out_dir: Option<&Path>) -> anyhow::Result<Self> {
        let base = source
            .file_stem()
            .with_context(|| format!("{} has no file name", source.display()))?;
        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let named = |extension: &str| {
            let mut name = base.to_os_string();
            name.push(".");
            name.push(extension);
            dir.join(name)
        };

        Ok(Self {
            trace: named("xml"),
            code: named("vm"),
        })
    }

    /// Write the artifacts the settings ask for and return their paths.
    fn write(&self, unit: &CompilationUnit, compiler: &Compiler) -> anyhow::Result<Vec<String>> {
        let settings = compiler.settings();
        let mut written = vec![];

        if let Some(dir) = self.trace.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create output directory {}", dir.display()))?;
        }

        if settings.is_enabled(&Setting::EmitTrace) {
            fs::write(&self.trace, unit.trace_text())
                .with_context(|| format!("cannot write {}", self.trace.display()))?;
            written.push(self.trace.display().to_string());
        }

        if settings.is_enabled(&Setting::EmitCode) {
            fs::write(&self.code, unit.code_text())
                .with_context(|| format!("cannot write {}", self.code.display()))?;
            written.push(self.code.display().to_string());
        }

        Ok(written)
    }

    /// Delete stale artifacts of a unit that no longer compiles.
    fn remove(&self) -> anyhow::Result<()> {
        for path in &[&self.trace, &self.code] {
            match fs::remove_file(path) {
                Ok(()) => log::debug!("removed stale {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("cannot remove {}", path.display()))
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_map_to_settings() {
        let opts = Opts::parse_from(&["jackc", "--no-trace", "--debug", "Main.jack"]);
        let settings = opts.settings();

        assert_eq!(opts.inputs, vec![PathBuf::from("Main.jack")]);
        assert!(!settings.is_enabled(&Setting::EmitTrace));
        assert!(settings.is_enabled(&Setting::EmitCode));
        assert!(settings.is_enabled(&Setting::Debug));
    }

    #[test]
    fn inputs_are_required() {
        assert!(Opts::try_parse_from(&["jackc"]).is_err());
    }

    #[test]
    fn artifacts_keep_the_whole_base_name() {
        let artifacts = Artifacts::new(Path::new("src/My.Main.jack"), None).unwrap();

        assert_eq!(artifacts.trace, PathBuf::from("src/My.Main.xml"));
        assert_eq!(artifacts.code, PathBuf::from("src/My.Main.vm"));
    }

    #[test]
    fn artifacts_can_be_redirected() {
        let artifacts = Artifacts::new(Path::new("src/Main.jack"), Some(Path::new("out"))).unwrap();

        assert_eq!(artifacts.trace, PathBuf::from("out/Main.xml"));
        assert_eq!(artifacts.code, PathBuf::from("out/Main.vm"));
    }

    #[test]
    fn only_jack_files_are_sources() {
        assert!(has_source_extension(Path::new("dir/Main.jack")));
        assert!(!has_source_extension(Path::new("dir/Main.vm")));
        assert!(!has_source_extension(Path::new("dir/jack")));
    }
}
