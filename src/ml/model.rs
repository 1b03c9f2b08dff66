use burn::{
    nn::{
        Dropout, DropoutConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SignModelConfig {
    pub num_features: usize,
    pub num_classes:  usize,
    pub hidden1:      usize,
    pub hidden2:      usize,
    pub dropout:      f64,
}

impl SignModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SignModel<B> {
        let fc1   = LinearConfig::new(self.num_features, self.hidden1).init(device);
        let fc2   = LinearConfig::new(self.hidden1, self.hidden2).init(device);
        let out   = LinearConfig::new(self.hidden2, self.num_classes).init(device);
        let drop1 = DropoutConfig::new(self.dropout).init();
        let drop2 = DropoutConfig::new(self.dropout).init();
        SignModel { fc1, drop1, fc2, drop2, out }
    }

    /// Print a per-layer architecture summary to stdout.
    pub fn summary(&self) {
        let rows = [
            ("dense_1 (ReLU)",  self.hidden1,     (self.num_features + 1) * self.hidden1),
            ("dropout_1",       self.hidden1,     0),
            ("dense_2 (ReLU)",  self.hidden2,     (self.hidden1 + 1) * self.hidden2),
            ("dropout_2",       self.hidden2,     0),
            ("output (logits)", self.num_classes, (self.hidden2 + 1) * self.num_classes),
        ];

        println!("Model: sign classifier ({} features in)", self.num_features);
        println!("{:<18} {:>10} {:>10}", "Layer", "Width", "Params");
        for (name, width, params) in rows {
            println!("{:<18} {:>10} {:>10}", name, width, params);
        }
        println!("Total params: {}", self.num_parameters());
    }

    /// Total trainable parameter count (weights + biases of all
    /// three Linear layers; dropout has none).
    pub fn num_parameters(&self) -> usize {
        (self.num_features + 1) * self.hidden1
            + (self.hidden1 + 1) * self.hidden2
            + (self.hidden2 + 1) * self.num_classes
    }
}

#[derive(Module, Debug)]
pub struct SignModel<B: Backend> {
    pub fc1:   Linear<B>,
    pub drop1: Dropout,
    pub fc2:   Linear<B>,
    pub drop2: Dropout,
    pub out:   Linear<B>,
}

impl<B: Backend> SignModel<B> {
    /// features: [batch, num_features] → logits: [batch, num_classes]
    ///
    /// The output is raw logits: cross-entropy folds the softmax in
    /// during training, and argmax over logits gives the same class
    /// ranking as argmax over probabilities.
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        use burn::tensor::activation::relu;

        let x = relu(self.fc1.forward(features));
        let x = self.drop1.forward(x);
        let x = relu(self.fc2.forward(x));
        let x = self.drop2.forward(x);
        self.out.forward(x)
    }

    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        labels:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(features);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }
}
