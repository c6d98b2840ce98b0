mod command;
mod view;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use command::{Command, HELP};
use pandaqa_ui::events::lookup;
use pandaqa_ui::{
    Binding, Controller, Element, EventKind, HttpBackend, MemoryPage, Page, SelectedFile,
    Source, UiConfig, UiEvent,
};
use tokio::sync::Mutex;

type Shell = Controller<HttpBackend, MemoryPage>;

fn confirm_on_stdin(message: &str) -> bool {
    print!("{} [y/N] ", message);
    io::stdout().flush().ok();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Fires the listener bound to `kind` on `source`, as the page would.
async fn fire(controller: &Shell, bindings: &[Binding], source: Source, kind: EventKind) {
    match lookup(bindings, &source, kind) {
        Some(event) => controller.dispatch(event).await,
        None => println!("Nothing is listening for {:?} on {:?}", kind, source),
    }
}

async fn set_value(page: &Mutex<MemoryPage>, element: Element, value: &str) {
    page.lock().await.set_value(element, value);
}

/// Runs one command; returns `false` when the shell should exit.
async fn run(
    command: Command,
    controller: &Shell,
    bindings: &[Binding],
    page: &Mutex<MemoryPage>,
) -> bool {
    match command {
        Command::Empty => return true,
        Command::Quit => return false,
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Unknown(line) => {
            println!("Unknown command: {} (try `help`)", line);
            return true;
        }
        Command::Show => {}
        Command::Status => controller.refresh_status().await,
        Command::Tab(id) => fire(controller, bindings, Source::TabButton(id), EventKind::Click).await,
        Command::Source(source) => set_value(page, Element::TextSource, &source).await,
        Command::Text(text) => {
            set_value(page, Element::TextInput, &text).await;
            fire(controller, bindings, Source::Element(Element::TextForm), EventKind::Submit).await;
        }
        Command::File(path) => {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    println!("Cannot read {}: {}", path.display(), err);
                    return true;
                }
            };
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            page.lock().await.select_file(Some(SelectedFile { name, bytes }));
            fire(controller, bindings, Source::Element(Element::FileInput), EventKind::Change).await;
        }
        Command::Upload => {
            fire(controller, bindings, Source::Element(Element::FileForm), EventKind::Submit).await
        }
        Command::TopK(k) => set_value(page, Element::TopK, &k).await,
        Command::Ask(question) => {
            set_value(page, Element::QueryInput, &question).await;
            fire(controller, bindings, Source::Element(Element::QueryForm), EventKind::Submit).await;
        }
        Command::Clear => {
            fire(controller, bindings, Source::Element(Element::ClearButton), EventKind::Click).await
        }
        Command::Model => controller.dispatch(UiEvent::ModelStatusRequested).await,
        Command::Save(dir) => controller.dispatch(UiEvent::SaveRequested(dir)).await,
        Command::Load(dir) => controller.dispatch(UiEvent::LoadRequested(dir)).await,
    }

    print!("{}", view::render(&*page.lock().await));
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = UiConfig::from_env()?;
    let backend = Arc::new(HttpBackend::new(&config)?);
    let page = Arc::new(Mutex::new(MemoryPage::new().with_confirm(confirm_on_stdin)));
    let controller = Controller::new(backend, Arc::clone(&page), &config);

    println!("PandaQA console on {} (type `help`)", config.base_url);
    controller.start().await;
    let bindings = controller.bindings().await;
    log::info!("Installed {} listeners", bindings.len());
    print!("{}", view::render(&*page.lock().await));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if !run(Command::parse(&line), &controller, &bindings, &page).await {
            break;
        }
    }

    Ok(())
}
