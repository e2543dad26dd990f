//! Reading inputs and turning them into runnable images.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use nanoforth_bytecode::{Image, Symbols};
use nanoforth_compiler::{Compiled, Diagnostics, Error, compile};

use super::CommandError;

pub fn read_source(path: &Path) -> Result<String, CommandError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CommandError::Io(format!("failed to read stdin: {}", e)))?;
        return Ok(buf);
    }
    fs::read_to_string(path)
        .map_err(|e| CommandError::Io(format!("failed to read '{}': {}", path.display(), e)))
}

pub fn read_image(path: &Path) -> Result<Image, CommandError> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| CommandError::Io(format!("failed to read stdin: {}", e)))?;
        buf
    } else {
        fs::read(path)
            .map_err(|e| CommandError::Io(format!("failed to read '{}': {}", path.display(), e)))?
    };
    Ok(Image::from_bytes(&bytes)?)
}

/// Render compiler diagnostics against the source they came from.
pub fn render_diagnostics(diag: &Diagnostics, source: &str, path: &Path, color: bool) -> String {
    let path = path.to_string_lossy();
    let mut out = diag
        .printer()
        .source(source)
        .path(&path)
        .colored(color)
        .render();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Compile `source`, turning failures into rendered diagnostics.
pub fn compile_source(source: &str, path: &Path, color: bool) -> Result<Compiled, CommandError> {
    compile(source).map_err(|err| compile_error(err, source, path, color))
}

pub fn compile_error(err: Error, source: &str, path: &Path, color: bool) -> CommandError {
    let rendered = match err.diagnostics() {
        Some(diag) => render_diagnostics(diag, source, path, color),
        None => format!("error: {}\n", err),
    };
    CommandError::Compile { rendered }
}

/// Print non-fatal diagnostics to stderr.
pub fn print_warnings(warnings: &Diagnostics, source: &str, path: &Path, color: bool) {
    if warnings.is_empty() {
        return;
    }
    eprint!("{}", render_diagnostics(warnings, source, path, color));
}

/// What the VM commands run: an image plus whatever labels are known.
pub struct Program {
    pub image: Image,
    pub symbols: Symbols,
}

/// Load `path` as an image, or compile it as source.
pub fn load_program(path: &Path, is_image: bool, color: bool) -> Result<Program, CommandError> {
    if is_image {
        return Ok(Program {
            image: read_image(path)?,
            symbols: Symbols::new(),
        });
    }

    let source = read_source(path)?;
    let compiled = compile_source(&source, path, color)?;
    print_warnings(&compiled.warnings, &source, path, color);
    Ok(Program {
        image: compiled.image,
        symbols: compiled.symbols,
    })
}
