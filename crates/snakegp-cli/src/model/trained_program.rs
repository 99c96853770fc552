use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snakegp_program::Program;

use crate::util;

/// Result of a training run as saved to disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedProgram {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f64,
    /// Rounds the program survived in its evaluation run.
    pub rounds: usize,
    pub program: Program,
}

/// Files accepted by `replay`: a saved model or a bare serialized tree.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProgramFile {
    Trained(TrainedProgram),
    Bare(Program),
}

impl TrainedProgram {
    /// Loads the program stored in `path`, whichever of the two file forms it
    /// has.
    pub fn open_program(path: &Path) -> anyhow::Result<Program> {
        let program = match util::read_json_file("program", path)? {
            ProgramFile::Trained(model) => {
                log::info!(
                    "loaded model {:?} trained at {} (fitness {:.1}, {} rounds)",
                    model.name,
                    model.trained_at,
                    model.final_fitness,
                    model.rounds
                );
                model.program
            }
            ProgramFile::Bare(program) => program,
        };
        Ok(program)
    }
}
