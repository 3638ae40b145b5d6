use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

/// Task head stacked on top of the BERT encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BertHead {
    /// No head: hidden states are mean-pooled into sentence embeddings.
    Pooling,
    /// `[CLS]` pooler + linear classifier with `num_labels` outputs.
    Classifier { num_labels: usize },
    /// Per-token start/end logits (`qa_outputs`).
    SpanLogits,
}

struct BertEncoderImpl {
    bert: BertModel,
    pooler: Option<Linear>,
    head: Option<Linear>,
}

impl BertEncoderImpl {
    fn load(vb: VarBuilder, config: &Config, head: BertHead) -> Result<Self> {
        let (bert_vb, prefix) = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            (vb.pp("bert"), Some("bert"))
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            (vb.pp("roberta"), Some("roberta"))
        } else {
            (vb.clone(), None)
        };
        let bert = BertModel::load(bert_vb, config)?;

        let hidden_size = config.hidden_size;
        let pooler_name = match prefix {
            Some(p) => format!("{p}.pooler.dense"),
            None => "pooler.dense".to_string(),
        };

        let (pooler, head) = match head {
            BertHead::Pooling => (None, None),
            BertHead::Classifier { num_labels } => {
                let pooler = if vb.contains_tensor(&format!("{pooler_name}.weight")) {
                    Some(candle_nn::linear(hidden_size, hidden_size, vb.pp(&pooler_name))?)
                } else {
                    None
                };
                let classifier = candle_nn::linear(hidden_size, num_labels, vb.pp("classifier"))?;
                (pooler, Some(classifier))
            }
            BertHead::SpanLogits => {
                let qa = candle_nn::linear(hidden_size, 2, vb.pp("qa_outputs"))?;
                (None, Some(qa))
            }
        };

        Ok(Self { bert, pooler, head })
    }
}

/// Shared BERT encoder used by the sentence embedder, the yes/no judge and the reader.
///
/// Weights are mmapped once and shared read-only behind an `Arc`.
#[derive(Clone)]
pub struct BertEncoder(std::sync::Arc<BertEncoderImpl>);

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device, head: BertHead) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        // SAFETY: the safetensors file is treated as immutable for the process lifetime.
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = BertEncoderImpl::load(vb, &config, head)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    /// Last hidden states, `[batch, seq, hidden]`.
    pub fn hidden_states(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))
    }

    /// Attention-masked mean pooling, `[batch, hidden]`.
    pub fn mean_pooled(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self.hidden_states(input_ids, token_type_ids, attention_mask)?;
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        summed.broadcast_div(&counts)
    }

    /// Classifier logits, `[batch, num_labels]`.
    pub fn classify(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let head = self.head("classifier")?;
        let hidden = self.hidden_states(input_ids, token_type_ids, attention_mask)?;
        let cls_token = hidden.i((.., 0, ..))?;
        let pooled = match &self.0.pooler {
            Some(pooler) => pooler.forward(&cls_token)?.tanh()?,
            None => cls_token,
        };
        head.forward(&pooled)
    }

    /// Start and end logits, each `[batch, seq]`.
    pub fn span_logits(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<(Tensor, Tensor)> {
        let head = self.head("qa_outputs")?;
        let hidden = self.hidden_states(input_ids, token_type_ids, attention_mask)?;
        let logits = head.forward(&hidden)?;
        let start = logits.i((.., .., 0))?.contiguous()?;
        let end = logits.i((.., .., 1))?.contiguous()?;
        Ok((start, end))
    }

    fn head(&self, name: &str) -> Result<&Linear> {
        self.0
            .head
            .as_ref()
            .ok_or_else(|| candle::Error::Msg(format!("encoder loaded without a {name} head")))
    }
}

/// Stacks per-sequence token rows (already padded to equal length) into `[batch, seq]`.
pub fn stack_rows(rows: &[&[u32]], device: &Device) -> Result<Tensor> {
    let seq_len = rows.first().map(|row| row.len()).unwrap_or(0);
    let flat: Vec<u32> = rows.iter().flat_map(|row| row.iter().copied()).collect();
    Tensor::from_vec(flat, (rows.len(), seq_len), device)
}
