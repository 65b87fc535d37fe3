use std::collections::VecDeque;

use engine_logging::{engine_debug, engine_info, engine_warn};
use wallpaper_core::{update, Msg, RunReport, RunState};
use wallpaper_engine::Engine;

use super::cli::Cli;
use super::config::{resolve_settings, Settings};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};

/// Resolves settings, sets up logging and performs one wallpaper run.
///
/// Every failure ends up in the returned report.
pub async fn run_app(cli: Cli) -> RunReport {
    let settings = resolve_settings(&cli);

    let destination = match settings.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, engine_logging::level_for(settings.verbose));
    for warning in &settings.warnings {
        engine_warn!("{}", warning);
    }

    let start = start_msg(&settings);
    let engine = Engine::new(settings.engine);
    run(EffectRunner::new(engine), start).await
}

fn start_msg(settings: &Settings) -> Msg {
    if settings.offline {
        Msg::StartOffline
    } else {
        Msg::Start {
            channel: settings.channel.clone(),
            window: settings.window,
        }
    }
}

/// Drives the core state machine until no effects are pending.
///
/// Every effect yields exactly one message and terminal phases emit no
/// effects, so the loop always ends.
pub async fn run(mut runner: EffectRunner, start: Msg) -> RunReport {
    let mut state = RunState::new();
    let mut inbox = VecDeque::from([start]);

    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        if state.consume_dirty() {
            engine_debug!("Phase {:?}", state.phase());
        }
        for effect in effects {
            inbox.push_back(runner.run(effect).await);
        }
    }

    let report = state.report();
    engine_info!("{}", report.status_line());
    report
}
