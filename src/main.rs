use qubit_lab::algorithms::{
    sample_bell_pairs, simulate_bb84, BellStatistics, GroverRun, SearchSize,
};
use qubit_lab::core::{
    project_to_screen, project_to_sphere, Gate, LabSession, MeasurementHistory, QubitState,
    KEY_STATES,
};
use qubit_lab::LabConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(&mut args) {
        Ok(c) => c,
        Err(e) => { eprintln!("{e}"); std::process::exit(1); }
    };

    print_banner();

    match args.first().map(String::as_str) {
        None | Some("demo")           => run_all_demos(&config),
        Some("gates")                 => cli_gates(&config, &args[1..]),
        Some("bloch")                 => demo_bloch(&config),
        Some("grover")                => cli_grover(&args[1..]),
        Some("bb84")                  => demo_bb84(&config),
        Some("bell")                  => demo_bell(&config),
        Some("help") | Some("--help") => print_help(),
        Some(unknown) => {
            eprintln!("Unknown command '{}'. Run 'qubit-lab help' for usage.", unknown);
            std::process::exit(1);
        }
    }
}

/// Strip `--config <file>` from `args` and load it.
fn load_config(args: &mut Vec<String>) -> qubit_lab::Result<LabConfig> {
    let path = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            if i + 1 >= args.len() {
                return Err(qubit_lab::LabError::invalid_config("--config", "missing file path"));
            }
            let p = PathBuf::from(args.remove(i + 1));
            args.remove(i);
            Some(p)
        }
        None => None,
    };
    LabConfig::load(path.as_deref())
}

fn print_banner() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║          qubit-lab v0.1.0                    ║");
    println!("║   Single-Qubit & Amplitude Simulation Lab    ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();
}

fn print_help() {
    println!("Usage: qubit-lab [--config FILE] [COMMAND] [ARGS]\n");
    println!("Commands:");
    println!("  demo                    Run every demonstration");
    println!("  gates <G> [G..]         Apply gates to |0⟩ and measure (G: H X Y Z S T)");
    println!("  bloch                   Key states on the Bloch sphere");
    println!("  grover <N> <target>     Amplitude amplification (N: 4, 8, 16, 32)");
    println!("         [--json]         Emit every step as JSON");
    println!("  bb84                    Sample one BB84 key exchange");
    println!("  bell                    Sample |Φ+⟩ measurement pairs");
    println!("  help                    Show this message\n");
    println!("Config (JSON): history_capacity, display_precision, projection,");
    println!("               bb84_rounds, bell_shots, seed");
    println!("Logging:       RUST_LOG=debug qubit-lab demo");
}

// ── CLI ───────────────────────────────────────────────────────────────────

fn cli_gates(config: &LabConfig, names: &[String]) {
    if names.is_empty() {
        eprintln!("Usage: qubit-lab gates <G> [G..]");
        std::process::exit(1);
    }
    let gates = match names.iter().map(|n| n.parse::<Gate>()).collect::<Result<Vec<_>, _>>() {
        Ok(g) => g,
        Err(e) => { eprintln!("{e}"); std::process::exit(1); }
    };

    println!("━━━ Gate Sequence ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let mut lab = LabSession::with_source(
        MeasurementHistory::new(config.history_capacity),
        config.rng(),
    );
    let p = config.display_precision;
    println!("  start        {:.*}", p, lab.state());
    for gate in gates {
        lab.apply(gate);
        println!("  {:<12} {:.*}", gate.name(), p, lab.state());
    }
    let (p0, p1) = lab.probabilities();
    println!("\nP(0) = {p0:.4}  P(1) = {p1:.4}");
    lab.measure_many(config.history_capacity);
    let (f0, f1) = lab.history().window_frequencies();
    println!("Sampled {} shots: {}  (f0={f0:.2}, f1={f1:.2})", lab.history().len(), lab.history());
}

fn cli_grover(args: &[String]) {
    let parse = |i: usize| args.get(i).and_then(|s| s.parse::<usize>().ok());
    let (n, target) = match (parse(0), parse(1)) {
        (Some(n), Some(t)) => (n, t),
        _ => { eprintln!("Usage: qubit-lab grover <N> <target> [--json]"); std::process::exit(1); }
    };
    let run = match SearchSize::try_from(n).and_then(|size| GroverRun::new(size, target)) {
        Ok(r) => r,
        Err(e) => { eprintln!("{e}"); std::process::exit(1); }
    };

    if args.iter().any(|a| a == "--json") {
        match serde_json::to_string_pretty(&run) {
            Ok(json) => println!("{json}"),
            Err(e) => { eprintln!("Cannot encode run: {e}"); std::process::exit(1); }
        }
        return;
    }
    print_grover(&run);
}

// ── Demos ─────────────────────────────────────────────────────────────────

fn run_all_demos(config: &LabConfig) {
    demo_single_qubit(config);
    demo_bloch(config);
    demo_measurement(config);
    demo_grover();
    demo_bb84(config);
    demo_bell(config);
}

fn demo_single_qubit(config: &LabConfig) {
    println!("━━━ Demo 1: Gate Application ━━━━━━━━━━━━━━━━━━━━");
    let p = config.display_precision;
    let mut lab = LabSession::new();
    println!("Initial:          {:.*}", p, lab.state());
    lab.h();
    println!("After H:          {:.*}", p, lab.state());
    lab.s();
    println!("After S:          {:.*}", p, lab.state());
    lab.undo();
    lab.z().h();
    println!("H·Z·H = X on |0⟩: {:.*}", p, lab.state());
    println!("Sequence:         {}", lab.gates().sequence_label());
    println!();
}

fn demo_bloch(config: &LabConfig) {
    println!("━━━ Demo 2: Bloch Sphere Key States ━━━━━━━━━━━━━");
    for k in KEY_STATES.iter() {
        let v = project_to_sphere(k.theta, k.phi);
        let s = project_to_screen(&v, &config.projection);
        println!(
            "  {:<5} ({:+.3}, {:+.3}, {:+.3})  screen ({:+7.2}, {:+7.2})  {}",
            k.label, v.x, v.y, v.z, s.x, s.y, k.description
        );
    }
    println!();
}

fn demo_measurement(config: &LabConfig) {
    println!("━━━ Demo 3: Weighted Measurement ━━━━━━━━━━━━━━━━");
    // θ = 2π/3 gives p0 = cos²(π/3) = 0.25
    let state = QubitState::from_angles(2.0 * std::f64::consts::PI / 3.0, 0.0);
    let mut rng = config.rng();
    let mut history = MeasurementHistory::new(config.history_capacity);
    for _ in 0..10_000 {
        history.measure(&state, &mut rng);
    }
    let (f0, f1) = history.frequencies();
    let (p0, p1) = state.probabilities();
    println!("Expected P(0)={p0:.4} P(1)={p1:.4}");
    println!("Observed f(0)={f0:.4} f(1)={f1:.4} over {} shots", history.total());
    println!("Last {}: {}", history.len(), history);
    println!();
}

fn demo_grover() {
    println!("━━━ Demo 4: Grover Amplitude Amplification ━━━━━━");
    match GroverRun::new(SearchSize::N8, 3) {
        Ok(run) => print_grover(&run),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn print_grover(run: &GroverRun) {
    print!("{run}");
    for (k, amps) in run.steps().iter().enumerate() {
        let peak = run.peak_magnitude(k).unwrap_or(1.0).max(f64::EPSILON);
        let bars: String = amps
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let level = ((a.abs() / peak) * 8.0).round() as usize;
                let c = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'][level.min(8)];
                if i == run.target() && *a < 0.0 { '▼' } else { c }
            })
            .collect();
        println!("  step {k}: |{bars}|");
    }
    println!();
}

fn demo_bb84(config: &LabConfig) {
    println!("━━━ Demo 5: BB84 Key Distribution ━━━━━━━━━━━━━━━");
    let mut rng = config.rng();
    let exchange = simulate_bb84(config.bb84_rounds, &mut rng);
    println!("  #   Alice  A-basis  B-basis  Bob  kept");
    for (i, r) in exchange.rounds().iter().enumerate() {
        println!(
            "  {:<3} {:<6} {:<8} {:<8} {:<4} {}",
            i + 1,
            r.alice_bit,
            r.alice_basis.symbol(),
            r.bob_basis.symbol(),
            r.bob_result,
            if r.bases_match() { "✓" } else { "" }
        );
    }
    let key: String = exchange.sifted_key().iter().map(|b| b.to_string()).collect();
    println!("Sifted key ({} bits): {key}", exchange.match_count());
    println!("Error rate: {:.2}", exchange.error_rate());
    println!();
}

fn demo_bell(config: &LabConfig) {
    println!("━━━ Demo 6: Bell Pair |Φ+⟩ Sampling ━━━━━━━━━━━━━");
    let mut rng = config.rng();
    let shots = sample_bell_pairs(config.bell_shots, &mut rng);
    let stats = BellStatistics::from_shots(&shots);
    println!(
        "Sampling {} shots:  |00⟩={} |11⟩={} mismatched={}",
        stats.total(),
        stats.zeros_zeros,
        stats.ones_ones,
        stats.mismatches
    );
    println!("Correlation ⟨Z⊗Z⟩ = {:+.3}", stats.correlation());
    println!();
}
