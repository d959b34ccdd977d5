use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::io;
use tokio::time::{sleep, Duration};

use tmwatch::{
    config::Config,
    interrupt::ShutdownSignal,
    logging,
    monitor::{Exporter, StatusFetcher, StatusMonitor},
    ui::{App, FieldRegistry},
    Cli,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::new(cli)?;
    logging::init(&config)?;

    let monitor = StatusMonitor::new(StatusFetcher::new(config.tool.clone()));

    if config.once {
        return print_snapshot(&monitor, &config).await;
    }

    let mut shutdown = ShutdownSignal::install()?;
    tracing::info!(tool = %config.tool, interval = config.interval_seconds, "monitoring started");
    println!("Monitoring Time Machine status... Press Ctrl+C to exit.\n");

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_app(&mut terminal, &mut app, &monitor, &mut shutdown, config.refresh_interval()).await;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        Show
    )?;
    terminal.show_cursor()?;

    result?;

    tracing::info!("monitoring stopped");
    println!("\nMonitoring stopped.");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    monitor: &StatusMonitor,
    shutdown: &mut ShutdownSignal,
    refresh_interval: Duration,
) -> Result<()> {
    loop {
        let snapshot = monitor.poll().await;
        app.update_data(snapshot);
        terminal.draw(|f| app.render(f))?;

        tokio::select! {
            _ = sleep(refresh_interval) => {}
            _ = shutdown.recv() => return Ok(()),
        }
    }
}

async fn print_snapshot(monitor: &StatusMonitor, config: &Config) -> Result<()> {
    let snapshot = monitor.poll().await;
    let rows = FieldRegistry::new().rows(&snapshot.fields);
    let output = Exporter::export_snapshot(&snapshot, &rows, config.export_format)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
