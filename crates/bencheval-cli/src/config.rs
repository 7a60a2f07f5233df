use crate::cli::Cli;
use crate::error::{CliError, Result};
use bencheval::core::models::constraints::MoleculeConstraints;
use bencheval::core::selection::elements::parse_element_selection;
use bencheval::workflows::evaluate::EvaluationOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_RES_FORMAT: u32 = 13;
const DEFAULT_RES_FILE: &str = ".res";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    #[serde(default)]
    pub constraints: FileConstraints,
    #[serde(default)]
    pub evaluation: FileEvaluation,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConstraints {
    pub allowed_elements: Option<String>,
    pub required_elements_all: Option<String>,
    pub required_elements_one: Option<String>,
    pub min_charge: Option<i32>,
    pub max_charge: Option<i32>,
    pub max_uhf: Option<u32>,
    pub min_num_atoms: Option<usize>,
    pub max_num_atoms: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEvaluation {
    pub method: Option<String>,
    pub format: Option<u32>,
    pub strict: Option<bool>,
    pub res_file: Option<PathBuf>,
    pub directory: Option<PathBuf>,
    pub write_csv: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: anyhow::Error::new(e),
        })?;
        debug!("Loaded configuration file '{}'.", path.display());
        Ok(config)
    }
}

/// Everything the run needs, merged from the configuration file and the
/// command line (command line wins).
#[derive(Debug)]
pub struct AppSettings {
    pub constraints: MoleculeConstraints,
    pub options: EvaluationOptions,
    pub directory: PathBuf,
    pub write_csv: bool,
}

pub fn build_settings(cli: &Cli) -> Result<AppSettings> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_constraints = file_config.constraints;
    let file_evaluation = file_config.evaluation;

    let allowed_spec = cli
        .allowed_elements
        .clone()
        .or(file_constraints.allowed_elements);
    let required_all = cli
        .required_elements_all
        .clone()
        .or(file_constraints.required_elements_all);
    let required_one = cli
        .required_elements_one
        .clone()
        .or(file_constraints.required_elements_one);

    let constraints = build_constraints(
        allowed_spec.as_deref(),
        required_all.as_deref(),
        required_one.as_deref(),
        cli.min_charge.or(file_constraints.min_charge),
        cli.max_charge.or(file_constraints.max_charge),
        cli.max_uhf.or(file_constraints.max_uhf),
        cli.min_num_atoms.or(file_constraints.min_num_atoms),
        cli.max_num_atoms.or(file_constraints.max_num_atoms),
    )?;

    let method = cli
        .method
        .clone()
        .or(file_evaluation.method)
        .ok_or_else(|| {
            CliError::Config(
                "A method to evaluate must be provided via --method or the configuration file."
                    .to_string(),
            )
        })?;

    let options = EvaluationOptions {
        method,
        res_format: cli
            .format
            .or(file_evaluation.format)
            .unwrap_or(DEFAULT_RES_FORMAT),
        strict: cli.strict || file_evaluation.strict.unwrap_or(false),
        res_file: cli
            .res_file
            .clone()
            .or(file_evaluation.res_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RES_FILE)),
    };

    Ok(AppSettings {
        constraints,
        options,
        directory: cli
            .directory
            .clone()
            .or(file_evaluation.directory)
            .unwrap_or_else(|| PathBuf::from(".")),
        write_csv: cli.write_csv || file_evaluation.write_csv.unwrap_or(false),
    })
}

#[allow(clippy::too_many_arguments)]
fn build_constraints(
    allowed_spec: Option<&str>,
    required_all: Option<&str>,
    required_one: Option<&str>,
    min_charge: Option<i32>,
    max_charge: Option<i32>,
    max_uhf: Option<u32>,
    min_num_atoms: Option<usize>,
    max_num_atoms: Option<usize>,
) -> Result<MoleculeConstraints> {
    if required_all.is_some() && required_one.is_some() {
        return Err(CliError::Config(
            "Both required-elements-all and required-elements-one cannot be provided at the same time."
                .to_string(),
        ));
    }

    // "all" makes one group that must be contained in full; "one" makes one
    // single-element group per listed element.
    let mut required_groups: Vec<Vec<usize>> = Vec::new();
    if let Some(spec) = required_all {
        let elements: Vec<usize> = parse_element_selection(spec)?.into_iter().collect();
        if !elements.is_empty() {
            required_groups.push(elements);
        }
    }
    if let Some(spec) = required_one {
        for element in parse_element_selection(spec)? {
            required_groups.push(vec![element]);
        }
    }

    let mut builder = MoleculeConstraints::builder()
        .allowed_elements(parse_element_selection(allowed_spec.unwrap_or(""))?)
        .required_elements(required_groups);
    if let Some(value) = min_charge {
        builder = builder.min_charge(value);
    }
    if let Some(value) = max_charge {
        builder = builder.max_charge(value);
    }
    if let Some(value) = max_uhf {
        builder = builder.max_unpaired_electrons(value);
    }
    if let Some(value) = min_num_atoms {
        builder = builder.min_num_atoms(value);
    }
    if let Some(value) = max_num_atoms {
        builder = builder.max_num_atoms(value);
    }
    Ok(builder.build()?)
}
