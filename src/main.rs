//! Twisty Puzzle Viewer
//!
//! Builds a cube or pyramid puzzle, applies move sequences and shows the
//! result either as text or in an interactive 3D viewer.

mod visualization;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use twirl::geometry::Vector;
use twirl::notation::parse_moves;
use twirl::{EngineConfig, Puzzle, PuzzleFamily};

/// Turns cube and pyramid twisty puzzles.
#[derive(Parser)]
#[command(name = "twirl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a move sequence and print the sticker state.
    Show {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Moves such as "R U' F2".
        #[arg(long, default_value = "")]
        moves: String,
    },
    /// Open the interactive 3D viewer.
    View {
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },
}

#[derive(Args, Clone)]
struct PuzzleArgs {
    /// cube, pyramid or megaminx.
    #[arg(long, default_value = "cube")]
    family: PuzzleFamily,
    /// Layers per edge.
    #[arg(long, default_value_t = 3)]
    order: usize,
    /// Degrees a turning layer advances per frame.
    #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
    speed: f64,
    /// Light offset from the puzzle centre as "x,y,z"; repeatable. Replaces
    /// the default lights.
    #[arg(long = "light", value_parser = parse_offset)]
    lights: Vec<Vector>,
    /// Render without lights.
    #[arg(long, conflicts_with = "lights")]
    no_lights: bool,
}

impl Default for PuzzleArgs {
    fn default() -> Self {
        Self {
            family: PuzzleFamily::Cube,
            order: 3,
            speed: 1.0,
            lights: Vec::new(),
            no_lights: false,
        }
    }
}

impl PuzzleArgs {
    fn config(&self) -> EngineConfig {
        let mut config = EngineConfig {
            degrees_per_tick: self.speed,
            ..EngineConfig::default()
        };
        if self.no_lights {
            config.lights.clear();
        } else if !self.lights.is_empty() {
            let center = config.center;
            config.lights = self.lights.iter().map(|&offset| center + offset).collect();
        }
        config
    }
}

fn parse_offset(text: &str) -> Result<Vector, String> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("bad coordinate in \"{text}\": {e}"))?;
    match parts[..] {
        [x, y, z] => Ok(Vector::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got \"{text}\"")),
    }
}

fn parse_speed(text: &str) -> Result<f64, String> {
    let speed: f64 = text
        .trim()
        .parse()
        .map_err(|e| format!("bad speed \"{text}\": {e}"))?;
    if speed > 0.0 && speed.is_finite() {
        Ok(speed)
    } else {
        Err(format!("speed must be a positive number of degrees, got \"{text}\""))
    }
}

fn main() -> ExitCode {
    env_logger::builder().init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Show { puzzle, moves }) => {
            run_show(&puzzle, &moves).map(|text| println!("{text}"))
        }
        Some(Command::View { puzzle }) => run_view(&puzzle),
        None => run_view(&PuzzleArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Applies `moves` to a fresh puzzle and formats its sticker state.
fn run_show(args: &PuzzleArgs, moves: &str) -> twirl::Result<String> {
    let mut puzzle = Puzzle::new(args.family, args.order, args.config())?;
    let moves = parse_moves(args.family, moves)?;
    puzzle.apply_moves(&moves)?;
    let status = if puzzle.is_solved() { "solved" } else { "scrambled" };
    Ok(format!(
        "{} of order {} after {} moves ({status})\n{}",
        args.family,
        args.order,
        moves.len(),
        puzzle.sticker_text()
    ))
}

/// Opens the viewer on a fresh puzzle.
fn run_view(args: &PuzzleArgs) -> twirl::Result<()> {
    let puzzle = Puzzle::new(args.family, args.order, args.config())?;
    println!("Controls: Q/W/E/Z/R/T turn, A/S/D/X/F/G turn back, arrows rotate, +/- zoom");
    visualization::display(puzzle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_after_right_turn() {
        let output = run_show(&PuzzleArgs::default(), "R").unwrap();
        insta::assert_snapshot!(output, @r"
        cube of order 3 after 1 moves (scrambled)
        R: R=R RB=R RBD=R RBU=R RD=R RF=R RFD=R RFU=R RU=R
        L: L=L LB=L LBD=L LBU=L LD=L LF=L LFD=L LFU=L LU=L
        U: BU=U FU=U LBU=U LFU=U LU=U RBU=F RFU=F RU=F U=U
        D: BD=D D=D FD=D LBD=D LD=D LFD=D RBD=B RD=B RFD=B
        F: F=F FD=F FU=F LF=F LFD=F LFU=F RF=D RFD=D RFU=D
        B: B=B BD=B BU=B LB=B LBD=B LBU=B RB=U RBD=U RBU=U
        ");
    }

    #[test]
    fn test_show_rejects_bad_input() {
        let args = PuzzleArgs {
            family: PuzzleFamily::Pyramid,
            ..PuzzleArgs::default()
        };
        assert!(run_show(&args, "U").is_err());
        let args = PuzzleArgs {
            family: PuzzleFamily::Megaminx,
            ..PuzzleArgs::default()
        };
        assert!(run_show(&args, "").is_err());
    }

    #[test]
    fn test_light_offsets() {
        assert_eq!(parse_offset("1, -2,3.5"), Ok(Vector::new(1.0, -2.0, 3.5)));
        assert!(parse_offset("1,2").is_err());
        assert!(parse_offset("a,b,c").is_err());

        let args = PuzzleArgs {
            lights: vec![Vector::new(0.0, 0.0, 500.0)],
            ..PuzzleArgs::default()
        };
        let config = args.config();
        assert_eq!(config.lights, vec![config.center + Vector::new(0.0, 0.0, 500.0)]);
    }

    #[test]
    fn test_speed_must_be_positive() {
        assert_eq!(parse_speed("2.5"), Ok(2.5));
        for bad in ["0", "-5", "NaN", "inf", "fast"] {
            assert!(parse_speed(bad).is_err(), "{bad} accepted");
        }
        assert!(Cli::try_parse_from(["twirl", "show", "--speed", "0", "--moves", "R"]).is_err());
    }

    #[test]
    fn test_zero_speed_config_still_finishes() {
        let args = PuzzleArgs {
            speed: 0.0,
            ..PuzzleArgs::default()
        };
        let output = run_show(&args, "R U").unwrap();
        assert!(output.starts_with("cube of order 3 after 2 moves (scrambled)"));
    }

    #[test]
    fn test_cli_parses_show() {
        let cli =
            Cli::try_parse_from(["twirl", "show", "--family", "pyraminx", "--order", "4"]).unwrap();
        match cli.command {
            Some(Command::Show { puzzle, moves }) => {
                assert_eq!(puzzle.family, PuzzleFamily::Pyramid);
                assert_eq!(puzzle.order, 4);
                assert!(moves.is_empty());
            }
            _ => panic!("expected show"),
        }
    }
}
