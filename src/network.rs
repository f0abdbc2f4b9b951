//! Loading the checkpoint and running single-frame forward passes.

use std::{fmt, path::Path, str::FromStr};

use tract_onnx::{pb::ModelProto, prelude::*};

use crate::{preprocess, Checkpoint, Error, Features, Result, INPUT_SHAPE};

/// Which output of the network to read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Softmax class probabilities, the network's own output.
    Prob,
    /// Flattened pooled features feeding the classifier.
    Fc,
}

impl Layer {
    /// Internal node holding the flattened features.
    pub const FC_NODE: &'static str = "flatten0_output";

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Prob => "prob",
            Layer::Fc => "fc",
        }
    }

    /// Node the truncated network should end at, `None` for the full network.
    pub fn output_node(self) -> Option<&'static str> {
        match self {
            Layer::Prob => None,
            Layer::Fc => Some(Self::FC_NODE),
        }
    }
}

impl FromStr for Layer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prob" => Ok(Layer::Prob),
            "fc" => Ok(Layer::Fc),
            _ => Err(Error::InvalidLayer(s.to_owned())),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Plan = TypedRunnableModel<TypedModel>;

/// A network bound to a single `[1, 3, 224, 224]` input, ending at `layer`.
pub struct Network {
    plan: Plan,
    layer: Layer,
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

impl Network {
    pub fn load(checkpoint: &Checkpoint, layer: Layer) -> Result<Self> {
        let path = checkpoint.path();

        if !path.is_file() {
            return Err(Error::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "checkpoint not found"),
            ));
        }

        tracing::debug!(path = %path.display(), %layer, "loading checkpoint");

        let model = tract_onnx::onnx().model_for_path(&path)?;

        Self::bind(model, layer)
    }

    /// Builds a network from an ONNX graph already in memory.
    pub fn from_proto(proto: &ModelProto, layer: Layer) -> Result<Self> {
        let model = tract_onnx::onnx().model_for_proto_model(proto)?;

        Self::bind(model, layer)
    }

    fn bind(model: InferenceModel, layer: Layer) -> Result<Self> {
        let mut model = model.with_input_fact(0, f32::fact(INPUT_SHAPE).into())?;

        if let Some(node) = layer.output_node() {
            // everything past the node is pruned during optimisation
            model = model.with_output_names([node])?;
        }

        let plan = model.into_optimized()?.into_runnable()?;

        tracing::info!(%layer, "network ready");

        Ok(Network { plan, layer })
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// One forward pass, returning the first output's batch row flattened.
    pub fn forward(&self, input: tract_ndarray::Array4<f32>) -> Result<Features> {
        let outputs = self.plan.run(tvec!(input.into_tensor().into()))?;

        let output = outputs[0].to_array_view::<f32>()?;

        let values: Vec<f32> = if output.ndim() == 0 {
            output.iter().copied().collect()
        } else {
            output
                .index_axis(tract_ndarray::Axis(0), 0)
                .iter()
                .copied()
                .collect()
        };

        tracing::debug!(shape = ?output.shape(), len = values.len(), "forward pass done");

        Ok(Features::new(values))
    }

    /// Load `image` and run it through the network.
    pub fn extract(&self, image: impl AsRef<Path>) -> Result<Features> {
        let input = preprocess::load_image(image)?;
        self.forward(input)
    }
}
