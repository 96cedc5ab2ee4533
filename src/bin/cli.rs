//! CLI for building, comparing and inspecting face profiles.
//!
//! Usage:
//!   face-verify profile detection.json                 # Print encoded profile
//!   face-verify profile detection.json -o alice.bin    # Also save a template
//!   face-verify compare alice.bin probe.json           # Human-readable verdict
//!   face-verify compare alice.bin probe.json --json    # JSON verdict
//!   face-verify inspect alice.bin                      # Dump profile as JSON
//!
//! Inputs are read by extension: `.bin` is a template file, `.json` is a detector
//! record, anything else is a file holding an encoded profile string.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use face_verify::{ComparisonResult, Detection, FaceProfile, ScoringPolicy};
use tracing::{debug, info, Level};

const EXIT_OK: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_NO_MATCH: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "face-verify")]
#[command(author, version, about = "Face profile assembly and verification", long_about = None)]
struct Args {
    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a profile from a detector record and print its encoded form
    Profile {
        /// Detector output record (JSON)
        detection: PathBuf,

        /// Also write a binary template file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare an enrolled profile against a probe
    Compare {
        enrolled: PathBuf,
        probe: PathBuf,

        /// Scoring policy file (JSON); defaults to the built-in policy
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print a profile as JSON
    Inspect { input: PathBuf },
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match usage_error_status(&e) {
            Some(status) => {
                let _ = e.print();
                return ExitCode::from(status);
            }
            None => e.exit(),
        },
    };

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Exit status for a command line clap rejected, or `None` for help and version
/// output, which clap prints and exits on by itself.
///
/// Clap's own usage status is 2, which would read as "no match".
fn usage_error_status(e: &clap::Error) -> Option<u8> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        _ => Some(EXIT_ERROR),
    }
}

fn run(args: &Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match &args.command {
        Command::Profile { detection, output } => {
            let profile = assemble(detection)?;
            if let Some(path) = output {
                profile.save(path)?;
                info!("Template written to {:?}", path);
            }
            println!("{}", profile.encode()?);
            Ok(ExitCode::from(EXIT_OK))
        }
        Command::Compare {
            enrolled,
            probe,
            policy,
            json,
        } => {
            let policy = match policy {
                Some(path) => ScoringPolicy::load(path)?,
                None => ScoringPolicy::default(),
            };
            let enrolled = read_profile(enrolled)?;
            let probe = read_profile(probe)?;
            let result = policy.compare(&enrolled, &probe)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_human_readable(&result));
            }

            Ok(ExitCode::from(if result.overall_match {
                EXIT_OK
            } else {
                EXIT_NO_MATCH
            }))
        }
        Command::Inspect { input } => {
            let profile = read_profile(input)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(ExitCode::from(EXIT_OK))
        }
    }
}

fn assemble(path: &Path) -> Result<FaceProfile, Box<dyn std::error::Error>> {
    debug!("Reading detector record {:?}", path);
    let file = File::open(path)?;
    let detection: Detection = serde_json::from_reader(BufReader::new(file))?;
    Ok(FaceProfile::assemble(detection)?)
}

fn read_profile(path: &Path) -> Result<FaceProfile, Box<dyn std::error::Error>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("bin") => {
            debug!("Loading template {:?}", path);
            Ok(FaceProfile::load(path)?)
        }
        Some("json") => assemble(path),
        _ => {
            debug!("Decoding profile string from {:?}", path);
            let encoded = std::fs::read_to_string(path)?;
            Ok(FaceProfile::decode(&encoded)?)
        }
    }
}

fn format_human_readable(result: &ComparisonResult) -> String {
    let d = &result.details;
    let mark = |m: bool| if m { "match" } else { "no match" };
    let mut s = String::new();

    let verdict = if result.overall_match { "MATCH" } else { "NO MATCH" };
    s.push_str(&format!("Verdict: {} ({}% confidence)\n", verdict, result.confidence));
    s.push_str(&format!("Critical matches: {}/3\n", result.critical_matches()));

    s.push_str("\nFactors:\n");
    s.push_str(&format!(
        "  Descriptor: {:>3}  distance {:.4}  {}\n",
        d.descriptor_similarity,
        d.descriptor_distance,
        mark(result.descriptor_match)
    ));
    s.push_str(&format!("  Geometry:   {:>3}  {}\n", d.geometry_score, mark(result.geometry_match)));
    s.push_str(&format!("  Biometric:  {:>3}  {}\n", d.biometric_score, mark(result.biometric_match)));
    s.push_str(&format!("  Landmarks:  {:>3}  {}\n", d.landmark_score, mark(result.landmark_match)));

    s.push_str("\nDemographics:\n");
    s.push_str(&format!("  Age difference: {} years\n", d.age_difference));
    s.push_str(&format!("  Gender:         {}\n", mark(d.gender_match)));

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_do_not_look_like_no_match() {
        let err = Args::try_parse_from(["face-verify", "compare", "onlyone"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(usage_error_status(&err), Some(EXIT_ERROR));
        assert_ne!(EXIT_ERROR, EXIT_NO_MATCH);

        let err = Args::try_parse_from(["face-verify", "enroll"]).unwrap_err();
        assert_eq!(usage_error_status(&err), Some(EXIT_ERROR));
    }

    #[test]
    fn help_and_version_are_left_to_clap() {
        let err = Args::try_parse_from(["face-verify", "--help"]).unwrap_err();
        assert_eq!(usage_error_status(&err), None);

        let err = Args::try_parse_from(["face-verify", "--version"]).unwrap_err();
        assert_eq!(usage_error_status(&err), None);
    }

    #[test]
    fn compare_arguments() {
        let args = Args::try_parse_from([
            "face-verify", "compare", "alice.bin", "probe.json", "--json", "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Compare { json: true, policy: None, .. }));
    }
}
