mod render;

use std::io::{self, BufRead, Write};

use manos_shortcuts::{EditorConfig, FileStore, Input, ShortcutEditor};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(io::stderr)
        .init();

    let store = FileStore::in_data_dir()?;
    tracing::info!(dir = %store.dir().display(), "using document store");
    let mut editor = ShortcutEditor::open(store, EditorConfig::default());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "Type lines. `# `, `* `, `** `, `*** ` at line start are shortcuts. \
         Commands: :save :undo :redo :show :quit"
    )?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.as_str() {
            ":quit" => break,
            ":save" => editor.save()?,
            ":undo" => editor.dispatch(Input::Undo)?,
            ":redo" => editor.dispatch(Input::Redo)?,
            ":show" => {}
            text => {
                editor.type_text(text)?;
                editor.dispatch(Input::Return)?;
            }
        }
        writeln!(stdout, "{}", render::render(editor.state().content()))?;
        writeln!(stdout, "---")?;
    }

    Ok(())
}
