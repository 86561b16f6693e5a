//! Fits `y = 2x + 1` with a single linear unit.
//!
//! Run with `RUST_LOG=info` to see the loss, `RUST_LOG=debug` for the engine.

use dagrad_core::nn::{mse_loss, Layer, Linear, Reduction};
use dagrad_core::optim::{Optimizer, Sgd};
use dagrad_core::{DagradError, Graph, Matrix};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), DagradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let xs: Vec<f32> = (0..16).map(|i| i as f32 / 8.0 - 1.0).collect();
    let ys: Vec<f32> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
    let x = Matrix::from_vec(xs, 16, 1)?;
    let y = Matrix::from_vec(ys, 16, 1)?;

    let mut rng = StdRng::seed_from_u64(42);
    let mut model = Linear::new(1, 1, &mut rng)?;
    let mut opt = Sgd::with_momentum(0.05, 0.9, 0.0)?;

    for epoch in 0..200 {
        let mut graph = Graph::new();
        let input = graph.constant(x.clone());
        let target = graph.constant(y.clone());
        let prediction = model.forward(&mut graph, input)?;
        let loss = mse_loss(&mut graph, prediction, target, Reduction::Mean)?;

        graph.backward_from(loss, Matrix::ones(1, 1)?)?;
        model.collect_grads(&graph)?;
        let mut params = model.parameters_mut();
        opt.step(&mut params)?;
        opt.zero_grad(&mut params);

        if epoch % 20 == 0 {
            info!("epoch {:3}: loss {:.6}", epoch, graph.value(loss)?.as_slice()[0]);
        }
    }

    info!(
        "weight {}, bias {}",
        model.param("weight")?.value(),
        model.param("bias")?.value()
    );
    Ok(())
}
