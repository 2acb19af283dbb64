// src/main.rs
use webchat_client::Result;

#[tokio::main]
async fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        log::error!("Panic: {}", panic_info);
        eprintln!("{}", panic_info);
    }));

    if let Err(e) = webchat_client::run().await {
        log::error!("Fatal: {}", e);
        eprintln!("{}", e);
        return Err(e);
    }
    Ok(())
}
