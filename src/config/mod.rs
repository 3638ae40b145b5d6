//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERITY_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::batch::InconclusivePolicy;
use crate::constants::{
    DEFAULT_EVIDENCE_TOP_K, DEFAULT_MATCH_THRESHOLD, DEFAULT_RATE_LIMIT_INTERVAL,
    DEFAULT_VERIFY_THRESHOLD,
};
use crate::kb::KbSource;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERITY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Batch input file (`id<TAB>question` per line). Default: `./input.txt`.
    pub input_path: PathBuf,

    /// Batch output file, opened in append mode. Default: `./output.txt`.
    pub output_path: PathBuf,

    /// Sentence-encoder model directory (BERT + tokenizer).
    pub embedding_model_path: Option<PathBuf>,

    /// Yes/no judge model directory (BERT sequence classifier + tokenizer).
    pub judge_model_path: Option<PathBuf>,

    /// Extractive reader model directory (BERT QA head + tokenizer).
    pub reader_model_path: Option<PathBuf>,

    /// Model name handed to the chat client. Default: `llama2`.
    pub llm_model: String,

    /// Candidate search backend. Default: Wikipedia.
    pub kb_source: KbSource,

    /// Minimum spacing between external API calls. Default: 100ms.
    pub rate_limit_interval: Duration,

    /// Fuzzy-match threshold for answer extraction. Default: `0.70`.
    pub match_threshold: f32,

    /// Evidence-similarity threshold for fact verification. Default: `0.60`.
    pub verify_threshold: f32,

    /// Best evidence sentences averaged per verdict. Default: 3.
    pub evidence_top_k: usize,

    /// How `Inconclusive` verdicts are written to batch output.
    pub inconclusive_policy: InconclusivePolicy,
}

/// Default generator model used when `VERITY_LLM_MODEL` is not set.
pub const DEFAULT_LLM_MODEL: &str = "llama2";

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./input.txt"),
            output_path: PathBuf::from("./output.txt"),
            embedding_model_path: None,
            judge_model_path: None,
            reader_model_path: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            kb_source: KbSource::Wikipedia,
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            verify_threshold: DEFAULT_VERIFY_THRESHOLD,
            evidence_top_k: DEFAULT_EVIDENCE_TOP_K,
            inconclusive_policy: InconclusivePolicy::Incorrect,
        }
    }
}

impl Config {
    const ENV_INPUT_PATH: &'static str = "VERITY_INPUT_PATH";
    const ENV_OUTPUT_PATH: &'static str = "VERITY_OUTPUT_PATH";
    const ENV_EMBEDDING_MODEL_PATH: &'static str = "VERITY_EMBEDDING_MODEL_PATH";
    const ENV_JUDGE_MODEL_PATH: &'static str = "VERITY_JUDGE_MODEL_PATH";
    const ENV_READER_MODEL_PATH: &'static str = "VERITY_READER_MODEL_PATH";
    const ENV_LLM_MODEL: &'static str = "VERITY_LLM_MODEL";
    const ENV_KB_SOURCE: &'static str = "VERITY_KB_SOURCE";
    const ENV_RATE_LIMIT_MS: &'static str = "VERITY_RATE_LIMIT_MS";
    const ENV_MATCH_THRESHOLD: &'static str = "VERITY_MATCH_THRESHOLD";
    const ENV_VERIFY_THRESHOLD: &'static str = "VERITY_VERIFY_THRESHOLD";
    const ENV_EVIDENCE_TOP_K: &'static str = "VERITY_EVIDENCE_TOP_K";
    const ENV_INCONCLUSIVE_AS: &'static str = "VERITY_INCONCLUSIVE_AS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let input_path = Self::parse_path_from_env(Self::ENV_INPUT_PATH, defaults.input_path);
        let output_path = Self::parse_path_from_env(Self::ENV_OUTPUT_PATH, defaults.output_path);
        let embedding_model_path =
            Self::parse_optional_path_from_env(Self::ENV_EMBEDDING_MODEL_PATH);
        let judge_model_path = Self::parse_optional_path_from_env(Self::ENV_JUDGE_MODEL_PATH);
        let reader_model_path = Self::parse_optional_path_from_env(Self::ENV_READER_MODEL_PATH);
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let kb_source = Self::parse_kb_source_from_env(defaults.kb_source)?;
        let rate_limit_interval = Self::parse_millis_from_env(
            Self::ENV_RATE_LIMIT_MS,
            defaults.rate_limit_interval,
        )?;
        let match_threshold =
            Self::parse_threshold_from_env(Self::ENV_MATCH_THRESHOLD, defaults.match_threshold)?;
        let verify_threshold =
            Self::parse_threshold_from_env(Self::ENV_VERIFY_THRESHOLD, defaults.verify_threshold)?;
        let evidence_top_k =
            Self::parse_count_from_env(Self::ENV_EVIDENCE_TOP_K, defaults.evidence_top_k)?;
        let inconclusive_policy =
            Self::parse_inconclusive_policy_from_env(defaults.inconclusive_policy)?;

        Ok(Self {
            input_path,
            output_path,
            embedding_model_path,
            judge_model_path,
            reader_model_path,
            llm_model,
            kb_source,
            rate_limit_interval,
            match_threshold,
            verify_threshold,
            evidence_top_k,
            inconclusive_policy,
        })
    }

    /// Validates paths and basic invariants (does not create files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_path.exists() && !self.input_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.input_path.clone(),
            });
        }

        if self.output_path.exists() && !self.output_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.output_path.clone(),
            });
        }

        for path in [
            &self.embedding_model_path,
            &self.judge_model_path,
            &self.reader_model_path,
        ]
        .into_iter()
        .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.rate_limit_interval.is_zero() {
            return Err(ConfigError::ZeroRateLimit {
                name: Self::ENV_RATE_LIMIT_MS,
            });
        }

        if self.evidence_top_k == 0 {
            return Err(ConfigError::ZeroCount {
                name: Self::ENV_EVIDENCE_TOP_K,
            });
        }

        Self::check_threshold(Self::ENV_MATCH_THRESHOLD, self.match_threshold)?;
        Self::check_threshold(Self::ENV_VERIFY_THRESHOLD, self.verify_threshold)?;

        Ok(())
    }

    fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::ThresholdOutOfRange { name, value })
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_millis_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_count_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let parsed: f32 =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidNumber {
                            name: var_name,
                            value: value.clone(),
                        })?;
                Self::check_threshold(var_name, parsed)?;
                Ok(parsed)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_kb_source_from_env(default: KbSource) -> Result<KbSource, ConfigError> {
        match env::var(Self::ENV_KB_SOURCE) {
            Ok(value) => KbSource::parse(&value).ok_or(ConfigError::UnknownKbSource { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_inconclusive_policy_from_env(
        default: InconclusivePolicy,
    ) -> Result<InconclusivePolicy, ConfigError> {
        match env::var(Self::ENV_INCONCLUSIVE_AS) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "incorrect" => Ok(InconclusivePolicy::Incorrect),
                "inconclusive" => Ok(InconclusivePolicy::Inconclusive),
                _ => Err(ConfigError::UnknownInconclusivePolicy { value }),
            },
            Err(_) => Ok(default),
        }
    }
}
