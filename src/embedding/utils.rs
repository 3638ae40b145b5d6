use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory (or an explicit tokenizer path).
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join("tokenizer.json")
    } else {
        model_path.to_path_buf()
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates to `max_len` and pads batches to their longest member.
///
/// BERT-family models have a fixed position table; longer inputs must be truncated
/// before the forward pass.
pub fn load_batch_tokenizer(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;
    tokenizer.with_padding(Some(PaddingParams::default()));

    Ok(tokenizer)
}

/// Checks that a model directory carries the files [`BertEncoder`](super::bert::BertEncoder) needs.
pub fn check_model_dir(model_path: &Path) -> Result<(), String> {
    if !model_path.is_dir() {
        return Err(format!("model directory not found: {}", model_path.display()));
    }
    for file in ["config.json", "model.safetensors", "tokenizer.json"] {
        if !model_path.join(file).exists() {
            return Err(format!("missing {} in {}", file, model_path.display()));
        }
    }
    Ok(())
}
