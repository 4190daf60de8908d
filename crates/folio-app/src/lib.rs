//! Folio App Library
//!
//! Headless shell around the editor session. A host without a window feeds
//! the editor a recorded input script, then saves the resulting design as
//! JSON and optionally exports it as SVG.

pub mod cli;
pub mod script;

pub use cli::CliArgs;
pub use script::{ReplayReport, Script, Step, replay};

use folio_core::{
    BuiltinTemplates, DesignSnapshot, Editor, EditorError, EditorSettings, key_help, load_template,
};
use folio_render::{RenderContext, RenderError, Renderer, SvgRenderer};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by the shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown key '{key}' at step {step}")]
    UnknownKey { step: usize, key: String },
}

pub type AppResult<T> = Result<T, AppError>;

/// Build an editor from the command line: settings, then the starting design.
pub fn build_editor(args: &CliArgs) -> AppResult<Editor> {
    let settings = match &args.settings {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            EditorSettings::load(path)?
        }
        None => EditorSettings::default(),
    };

    let mut editor = Editor::with_settings(settings);
    editor.set_viewport_size(args.width, args.height);

    if let Some(path) = &args.design {
        let json = fs::read_to_string(path)?;
        editor.load(DesignSnapshot::from_json(&json)?);
    } else if let Some(category) = &args.template {
        editor.load(load_template(&BuiltinTemplates, category)?);
    }

    Ok(editor)
}

/// Run the shell end to end.
pub fn run(args: &CliArgs) -> AppResult<()> {
    if args.keys {
        println!("Keyboard shortcuts:\n{}", key_help());
        return Ok(());
    }

    let mut editor = build_editor(args)?;

    if let Some(path) = &args.script {
        let script = Script::load(path)?;
        let report = replay(&mut editor, &script)?;
        log::info!(
            "Replayed {} steps ({} handled), final state {}",
            report.steps,
            report.handled,
            editor.interaction_state().name()
        );
    }

    let json = editor.snapshot().to_json()?;
    match &args.output {
        Some(path) => {
            fs::write(path, &json)?;
            log::info!("Saved design to {}", path.display());
        }
        None => println!("{json}"),
    }

    if let Some(path) = &args.svg {
        export_svg(&editor, path)?;
    }
    if let Some(path) = &args.preview {
        write_preview(&editor, path)?;
    }

    Ok(())
}

/// Export the design, without selection chrome, to an SVG file.
pub fn export_svg(editor: &Editor, path: &Path) -> AppResult<()> {
    let svg = SvgRenderer::export(&editor.store, &editor.config)?;
    fs::write(path, svg)?;
    log::info!("Exported SVG to {}", path.display());
    Ok(())
}

/// Render the current view, selection included, to an SVG file.
pub fn write_preview(editor: &Editor, path: &Path) -> AppResult<()> {
    let ctx = RenderContext::from_editor(editor);
    let mut renderer = SvgRenderer::new();
    renderer.build_scene(&ctx)?;
    fs::write(path, renderer.svg())?;
    log::info!("Wrote preview to {}", path.display());
    Ok(())
}
