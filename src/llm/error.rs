use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request to model '{model}' failed: {message}")]
    Upstream { model: String, message: String },

    #[error("model '{model}' returned an empty completion")]
    EmptyCompletion { model: String },
}
