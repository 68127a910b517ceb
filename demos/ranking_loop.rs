//! Ranking loop — 4 workers, shared task contexts, exact LinUCB.
//!
//! No persistence. No HTTP. Just: initialize per-worker models → batch-score
//! against the task context → argmax (that part is yours) → observe a reward
//! → fold it back into the winner's model.
//!
//! Each simulated worker has a hidden skill vector; the observed reward is
//! its dot product with the context. Over the loop, the learned theta for
//! each worker converges toward its skill vector and routing concentrates on
//! whoever fits the current context best.
//!
//! Run with:
//!   cargo run --example ranking_loop

use linarm::{batch_compute_ucb, initialize_model, update_model, validate_model};

const DIM: usize = 4;

fn main() {
    // -----------------------------------------------------------------
    // 1. Register 4 workers: one fresh model each.
    // -----------------------------------------------------------------
    let skills: [[f64; DIM]; 4] = [
        [0.9, 0.1, 0.2, 0.1], // strong on feature 0
        [0.1, 0.8, 0.1, 0.3], // strong on feature 1
        [0.2, 0.2, 0.9, 0.1], // strong on feature 2
        [0.4, 0.4, 0.4, 0.4], // generalist
    ];

    let mut models: Vec<(Vec<Vec<f64>>, Vec<f64>)> = (0..skills.len())
        .map(|_| {
            let m = initialize_model(DIM, 1.0).unwrap();
            (m.matrix_a, m.vector_b)
        })
        .collect();

    // Two task profiles that favor different specialists.
    let contexts: [[f64; DIM]; 2] = [[1.0, 0.0, 0.2, 0.0], [0.0, 0.1, 1.0, 0.0]];

    // -----------------------------------------------------------------
    // 2. Ranking loop: score all, argmax, observe, update the winner.
    // -----------------------------------------------------------------
    let mut wins = [0usize; 4];
    for round in 0..60usize {
        let ctx = &contexts[round % contexts.len()];

        let a_list: Vec<Vec<Vec<f64>>> = models.iter().map(|(a, _)| a.clone()).collect();
        let b_list: Vec<Vec<f64>> = models.iter().map(|(_, b)| b.clone()).collect();
        let batch = batch_compute_ucb(&a_list, &b_list, ctx, 0.5).unwrap();

        // Argmax over UCB scores — the selection policy lives out here.
        let chosen = batch
            .results
            .iter()
            .filter_map(|w| w.result.as_ref().ok().map(|s| (w.worker_index, s.ucb)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .unwrap();
        wins[chosen] += 1;

        // Observe the outcome and fold it back in.
        let reward: f64 = skills[chosen]
            .iter()
            .zip(ctx.iter())
            .map(|(s, c)| s * c)
            .sum::<f64>()
            .clamp(0.0, 1.0);
        let (a, b) = &models[chosen];
        let next = update_model(a, b, ctx, reward).unwrap();
        models[chosen] = (next.matrix_a, next.vector_b);

        if round < 8 {
            println!("round {round:2}: chose worker {chosen}  reward={reward:.2}");
        }
    }

    // -----------------------------------------------------------------
    // 3. Inspect results.
    // -----------------------------------------------------------------
    println!("\n=== After 60 rounds ===");
    for (i, (a, b)) in models.iter().enumerate() {
        let d = validate_model(a, b).unwrap();
        println!(
            "worker {i}: wins={:2}  healthy={}  condition={:.2}",
            wins[i], d.is_healthy, d.condition_number
        );
    }

    // The specialists should dominate their matching contexts; the prior-only
    // models of never-chosen workers stay healthy (they are just the prior).
    let specialist_wins = wins[0] + wins[2];
    println!("\nspecialist share: {specialist_wins}/60");
}
