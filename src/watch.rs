//! The watch-rebuild-report loop.
//!
//! Watches the options file, re-renders the whole catalog on every change and
//! redraws a one-screen report. `Ctrl-C` leaves the loop cleanly.

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use notify::{RecursiveMode, Watcher};

use crate::options::RenderOptions;
use crate::report::{make_images, CompilationReport};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const YELLOW_BOLD: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// Changes close together are collapsed into one rebuild; editors tend to
/// fire several events per save.
const DEBOUNCE: Duration = Duration::from_millis(200);

enum Wakeup {
    Changed,
    Interrupted,
}

fn banner() {
    print!("{CLEAR_SCREEN}");
    println!("{YELLOW_BOLD}Watching Figures{RESET}");
    println!();
}

fn redraw(report: &CompilationReport) {
    banner();
    println!("last compilation: {}", Local::now().format("%H:%M:%S"));
    println!();
    print!("{report}");
}

/// Wait out the burst of events an editor fires per save.
///
/// Keeps draining change events until the channel stays quiet for one
/// debounce window, so a whole burst coalesces into a single rebuild and no
/// change is ever dropped. An interrupt arriving mid-burst wins.
fn settle(rx: &mpsc::Receiver<Wakeup>) -> Wakeup {
    loop {
        match rx.recv_timeout(DEBOUNCE) {
            Ok(Wakeup::Changed) => continue,
            Ok(Wakeup::Interrupted) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Wakeup::Interrupted
            }
            Err(mpsc::RecvTimeoutError::Timeout) => return Wakeup::Changed,
        }
    }
}

/// Re-read the options, keeping the previous ones when the file is broken.
///
/// The error is handed back alongside so the caller can show it; a broken
/// edit must never kill the session or silently reset the styling.
fn reload(path: &Path, previous: RenderOptions) -> (RenderOptions, Option<anyhow::Error>) {
    match RenderOptions::load(path) {
        Ok(options) => (options, None),
        Err(err) => (previous, Some(err)),
    }
}

/// Run the watch loop until interrupted.
pub fn watch(options_path: &Path) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let interrupt_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(Wakeup::Interrupted);
    })
    .context("failed to install the interrupt handler")?;

    // Watch the containing directory; editors replace files on save, which
    // would silently detach a watch on the file itself.
    let file_name = options_path
        .file_name()
        .context("options path has no file name")?
        .to_owned();
    let watch_dir = match options_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let change_tx = tx.clone();
    let target = file_name.clone();
    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        let Ok(event) = event else { return };
        if !event.kind.is_modify() && !event.kind.is_create() {
            return;
        }
        if event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(target.as_os_str()))
        {
            let _ = change_tx.send(Wakeup::Changed);
        }
    })
    .context("failed to create the file watcher")?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", watch_dir.display()))?;

    let mut options = match RenderOptions::load(options_path) {
        Ok(options) => options,
        Err(err) => {
            log::warn!("{err:#}, using defaults");
            RenderOptions::default()
        }
    };
    redraw(&make_images(&options));

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(Wakeup::Changed) => {
                if let Wakeup::Interrupted = settle(&rx) {
                    break;
                }
                let (reloaded, error) = reload(options_path, options);
                options = reloaded;
                if let Some(err) = error {
                    banner();
                    println!("could not generate images due to:");
                    println!("{err:#}");
                } else {
                    redraw(&make_images(&options));
                }
            }
            Ok(Wakeup::Interrupted) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    drop(watcher);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(tag: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("bezfig-watch-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("figures.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn event_bursts_coalesce_into_one_rebuild() {
        let (tx, rx) = mpsc::channel();
        for _ in 0..5 {
            tx.send(Wakeup::Changed).unwrap();
        }
        assert!(matches!(settle(&rx), Wakeup::Changed));
        // the whole burst is consumed, nothing left to retrigger
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn interrupt_during_a_burst_wins() {
        let (tx, rx) = mpsc::channel();
        tx.send(Wakeup::Changed).unwrap();
        tx.send(Wakeup::Interrupted).unwrap();
        assert!(matches!(settle(&rx), Wakeup::Interrupted));
    }

    #[test]
    fn broken_edit_keeps_the_previous_options() {
        let path = temp_file("broken", "curve_steps = \"many\"");
        let mut previous = RenderOptions::default();
        previous.curve_steps = 42;

        let (options, error) = reload(&path, previous);

        assert!(error.is_some());
        assert_eq!(options.curve_steps, 42);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn valid_edit_replaces_the_options() {
        let path = temp_file("valid", "curve_steps = 77");

        let (options, error) = reload(&path, RenderOptions::default());

        assert!(error.is_none());
        assert_eq!(options.curve_steps, 77);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
