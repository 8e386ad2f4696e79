use anyhow::{bail, Context, Result};

use trainload_core::cli::{render_activity_report, render_load_report};
use trainload_core::{
    analyze_training_load, load_config, parse_activity, EngineConfig, TrainingLoadRequest,
};

const USAGE: &str = "bruk: trackreport <spor.gpx> [--config cfg.json]
       trackreport --load <uker.json> [--config cfg.json]";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut input_path: Option<String> = None;
    let mut cfg_path: Option<String> = None;
    let mut load_mode = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => cfg_path = Some(args.next().context("--config mangler filsti")?),
            "--load" => {
                load_mode = true;
                input_path = Some(args.next().context("--load mangler filsti")?);
            }
            _ if input_path.is_none() => input_path = Some(arg),
            other => bail!("ukjent argument: {other}\n{USAGE}"),
        }
    }

    let Some(input_path) = input_path else {
        bail!("{USAGE}");
    };

    let cfg = match cfg_path {
        Some(p) => load_config(&p).with_context(|| format!("kunne ikke lese config {p}"))?,
        None => EngineConfig::default(),
    };

    let raw = std::fs::read_to_string(&input_path)
        .with_context(|| format!("kunne ikke lese {input_path}"))?;

    if load_mode {
        let req: TrainingLoadRequest =
            serde_json::from_str(&raw).with_context(|| format!("ugyldig uke-JSON {input_path}"))?;
        let report = analyze_training_load(&req, &cfg);
        print!("{}", render_load_report(&report.summary, &report.anomalies));
    } else {
        let activity =
            parse_activity(&raw, &cfg).with_context(|| format!("ugyldig sporlogg {input_path}"))?;
        print!("{}", render_activity_report(&activity));
    }
    Ok(())
}
