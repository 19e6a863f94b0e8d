/// Shared fixtures for end-to-end tests.
///
/// Writes reference and street-name inputs into a temp directory and runs
/// the built `addrgen` binary against them.
use std::path::PathBuf;
use std::process::{Command, Output};

pub const HEADER: &str = "AREA NAME,AREA CODE,DISTRICT NAME,DISTRICT NO,DELIVERY ZIPCODE,LOCALE NAME,PHYSICAL DELV ADDR,PHYSICAL CITY,PHYSICAL STATE,PHYSICAL ZIP,PHYSICAL ZIP 4\n";

/// A full locale-detail row with plausible filler in the unused columns.
pub fn locale_row(zip: &str, city: &str, state: &str) -> String {
    format!("PACIFIC,4E,SIERRA COASTAL,913,{zip},{city},100 POST OFFICE WAY,{city},{state},{zip},1234\n")
}

pub fn reference_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut csv = HEADER.to_string();
    for (zip, city, state) in rows {
        csv.push_str(&locale_row(zip, city, state));
    }
    csv
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub reference: PathBuf,
    pub streets: PathBuf,
    pub output: PathBuf,
}

impl Fixture {
    pub fn new(reference_csv: &str, street_names: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ZIP_Locale_Detail.csv");
        let streets = dir.path().join("CommonStreetNames.txt");
        let output = dir.path().join("out.csv");
        std::fs::write(&reference, reference_csv).unwrap();
        std::fs::write(&streets, street_names).unwrap();
        Self {
            dir,
            reference,
            streets,
            output,
        }
    }

    /// Run addrgen with the fixture's paths plus `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_addrgen"))
            .arg("--reference")
            .arg(&self.reference)
            .arg("--street-names")
            .arg(&self.streets)
            .arg("--output")
            .arg(&self.output)
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("failed to run addrgen")
    }

    /// Run addrgen, assert success, and return the output file contents.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "addrgen {:?} exited with {}: stderr={}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        std::fs::read_to_string(&self.output).expect("output file missing")
    }
}

/// Split one output row into its five fields. Only valid for rows without
/// quoted fields.
pub fn fields(line: &str) -> Vec<&str> {
    line.split(',').collect()
}
