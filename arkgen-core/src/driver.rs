//! Batch driver: one output file per input file.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use crate::ast::File;
use crate::emitter::{Emitter, UnsupportedPolicy};
use crate::error::CoreError;
use crate::writer::SourceWriter;

pub const OUTPUT_SUFFIX: &str = ".out";

/// Whether a failing file stops the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    #[default]
    StopOnError,
    KeepGoing,
}

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub minify: bool,
    /// Print start/finish notices per file to the diagnostic writer.
    pub verbose: bool,
    pub unsupported: UnsupportedPolicy,
    pub batch: BatchPolicy,
    /// Place outputs here instead of next to the input name.
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FileFailure {
    pub name: String,
    pub error: CoreError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub emitted: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// `<name>.out`, or `<out_dir>/<basename>.out` when an output directory is set.
pub fn output_path(name: &str, out_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{name}{OUTPUT_SUFFIX}");
    match out_dir {
        Some(dir) => {
            let base = Path::new(&file_name)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&file_name));
            dir.join(base)
        }
        None => PathBuf::from(file_name),
    }
}

/// Emit every file in order.
///
/// Under [`BatchPolicy::StopOnError`] the first failure is returned and the
/// remaining files are never attempted; outputs already written stay on disk.
pub fn generate(
    files: &[File],
    options: &EmitOptions,
    diagnostics: &mut dyn Write,
) -> Result<BatchReport, CoreError> {
    let mut report = BatchReport::default();
    for file in files {
        match generate_file(file, options, diagnostics) {
            Ok(path) => report.emitted.push(path),
            Err(error) => match options.batch {
                BatchPolicy::StopOnError => return Err(error),
                BatchPolicy::KeepGoing => {
                    tracing::error!(file = %file.name, %error, "emission failed");
                    report.failures.push(FileFailure {
                        name: file.name.clone(),
                        error,
                    });
                }
            },
        }
    }
    Ok(report)
}

pub fn generate_file(
    file: &File,
    options: &EmitOptions,
    diagnostics: &mut dyn Write,
) -> Result<PathBuf, CoreError> {
    let _span = info_span!("emit_file", file = %file.name).entered();
    if options.verbose {
        notice(diagnostics, format_args!("Started emitting {}", file.name));
    }
    let started = Instant::now();

    let path = output_path(&file.name, options.out_dir.as_deref());
    let output = fs::File::create(&path).map_err(|source| CoreError::Output {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "opened output");

    emit_nodes(file, options, BufWriter::new(output)).map_err(|error| match error {
        EmitFailure::Core(error) => error,
        EmitFailure::Io(source) => CoreError::Output {
            path: path.clone(),
            source,
        },
    })?;

    let elapsed = started.elapsed();
    info!(elapsed_ms = elapsed.as_secs_f64() * 1000.0, "emitted");
    if options.verbose {
        notice(
            diagnostics,
            format_args!(
                "Finished emitting {} ({:.2}ms)",
                file.name,
                elapsed.as_secs_f64() * 1000.0
            ),
        );
    }
    Ok(path)
}

/// Emit a single file into memory.
pub fn emit_to_string(file: &File, options: &EmitOptions) -> Result<String, CoreError> {
    let bytes = emit_nodes(file, options, Vec::new()).map_err(|error| match error {
        EmitFailure::Core(error) => error,
        EmitFailure::Io(_) => unreachable!("writes to a Vec cannot fail"),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

enum EmitFailure {
    Core(CoreError),
    Io(io::Error),
}

/// Each top-level node is committed only once it has emitted completely.
fn emit_nodes<W: Write>(file: &File, options: &EmitOptions, out: W) -> Result<W, EmitFailure> {
    let mut emitter = Emitter::new(SourceWriter::new(out, options.minify), options.unsupported);
    for node in &file.nodes {
        match emitter.emit(node) {
            Ok(()) => emitter.writer_mut().commit().map_err(EmitFailure::Io)?,
            Err(error) => {
                let mut writer = emitter.into_writer();
                writer.discard();
                if let Err(flush) = writer.finish() {
                    warn!(%flush, "failed to flush completed nodes");
                }
                return Err(EmitFailure::Core(error));
            }
        }
    }
    emitter.into_writer().finish().map_err(EmitFailure::Io)
}

fn notice(diagnostics: &mut dyn Write, message: std::fmt::Arguments<'_>) {
    // Notice failures are ignored.
    let _ = writeln!(diagnostics, "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Decl, Expr, Function, Node, Struct, Type, Variable};
    use tempfile::tempdir;

    fn point_file(name: String) -> File {
        File {
            name,
            nodes: vec![Node::Decl(Decl::Struct(Struct {
                name: "Point".into(),
                members: vec![
                    Variable::new("x", Type::named("Int")).into(),
                    Variable::new("y", Type::named("Int")).into(),
                ],
                attrs: Vec::new(),
            }))],
        }
    }

    fn main_function() -> Node {
        Node::Decl(Decl::Function(Function {
            name: "main".into(),
            params: Vec::new(),
            return_type: None,
            body: Block::default(),
            attrs: Vec::new(),
        }))
    }

    #[test]
    fn output_name_appends_suffix() {
        assert_eq!(output_path("src/main.ark", None), PathBuf::from("src/main.ark.out"));
        assert_eq!(
            output_path("src/main.ark", Some(Path::new("build"))),
            PathBuf::from("build/main.ark.out")
        );
    }

    #[test]
    fn writes_one_output_per_file() {
        let dir = tempdir().expect("tempdir");
        let files = vec![
            point_file(dir.path().join("a.ark").display().to_string()),
            point_file(dir.path().join("b.ark").display().to_string()),
        ];
        let mut diagnostics = Vec::new();
        let report = generate(&files, &EmitOptions::default(), &mut diagnostics).expect("generate");

        assert_eq!(report.emitted.len(), 2);
        assert!(diagnostics.is_empty(), "notices are verbose-only");
        let text = fs::read_to_string(dir.path().join("a.ark.out")).expect("read output");
        assert_eq!(text, "\nstruct Point {\n\tx: Int,\n\ty: Int\n}\n");
    }

    #[test]
    fn truncates_existing_output() {
        let dir = tempdir().expect("tempdir");
        let name = dir.path().join("a.ark").display().to_string();
        fs::write(format!("{name}.out"), "stale contents that are much longer").expect("seed");
        let file = File {
            name,
            nodes: vec![Node::Expr(Expr::Integer(1))],
        };
        let path = generate_file(&file, &EmitOptions::default(), &mut io::sink()).expect("emit");
        assert_eq!(fs::read_to_string(path).expect("read"), "1");
    }

    #[test]
    fn verbose_reports_start_and_finish() {
        let dir = tempdir().expect("tempdir");
        let file = point_file(dir.path().join("a.ark").display().to_string());
        let options = EmitOptions {
            verbose: true,
            ..EmitOptions::default()
        };
        let mut diagnostics = Vec::new();
        generate_file(&file, &options, &mut diagnostics).expect("emit");
        let log = String::from_utf8(diagnostics).expect("utf8");
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Started emitting "));
        assert!(lines[1].starts_with("Finished emitting "));
        assert!(lines[1].ends_with("ms)"));
    }

    #[test]
    fn unsupported_node_keeps_prior_nodes_only() {
        let dir = tempdir().expect("tempdir");
        let name = dir.path().join("a.ark").display().to_string();
        let file = File {
            name: name.clone(),
            nodes: vec![
                main_function(),
                Node::Expr(Expr::Binary {
                    op: crate::ast::BinOp::Add,
                    lhs: Box::new(Expr::Integer(1)),
                    rhs: Box::new(Expr::Other),
                }),
            ],
        };
        let err = generate_file(&file, &EmitOptions::default(), &mut io::sink()).unwrap_err();
        assert!(matches!(err, CoreError::Unsupported { .. }));
        let text = fs::read_to_string(format!("{name}.out")).expect("read");
        assert_eq!(text, "\nfunc main() {\n}\n");
    }

    struct BrokenFlush;

    impl Write for BrokenFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("flush failed"))
        }
    }

    #[test]
    fn flush_failure_does_not_mask_unsupported_node() {
        let file = File {
            name: "a.ark".into(),
            nodes: vec![main_function(), Node::Decl(Decl::Other)],
        };
        let result = emit_nodes(&file, &EmitOptions::default(), BrokenFlush);
        assert!(matches!(
            result,
            Err(EmitFailure::Core(CoreError::Unsupported { .. }))
        ));
    }

    #[test]
    fn stop_on_error_never_attempts_later_files() {
        let dir = tempdir().expect("tempdir");
        let broken = File {
            name: dir.path().join("broken.ark").display().to_string(),
            nodes: vec![Node::Decl(Decl::Other)],
        };
        let later = point_file(dir.path().join("later.ark").display().to_string());
        let err = generate(&[broken, later], &EmitOptions::default(), &mut io::sink()).unwrap_err();
        assert!(matches!(err, CoreError::Unsupported { .. }));
        assert!(!dir.path().join("later.ark.out").exists());
    }

    #[test]
    fn keep_going_records_failures_and_continues() {
        let dir = tempdir().expect("tempdir");
        let broken = File {
            name: dir.path().join("broken.ark").display().to_string(),
            nodes: vec![Node::Decl(Decl::Other)],
        };
        let later = point_file(dir.path().join("later.ark").display().to_string());
        let options = EmitOptions {
            batch: BatchPolicy::KeepGoing,
            ..EmitOptions::default()
        };
        let report = generate(&[broken, later], &options, &mut io::sink()).expect("report");
        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].name.ends_with("broken.ark"));
        assert_eq!(report.emitted, vec![dir.path().join("later.ark.out")]);
    }

    #[test]
    fn missing_output_directory_is_an_output_error() {
        let dir = tempdir().expect("tempdir");
        let file = point_file("a.ark".into());
        let options = EmitOptions {
            out_dir: Some(dir.path().join("does-not-exist")),
            ..EmitOptions::default()
        };
        let err = generate_file(&file, &options, &mut io::sink()).unwrap_err();
        assert!(matches!(err, CoreError::Output { .. }));
        assert!(err.to_string().contains("a.ark.out"));
    }

    #[test]
    fn emits_to_string_minified() {
        let file = point_file("a.ark".into());
        let options = EmitOptions {
            minify: true,
            ..EmitOptions::default()
        };
        let text = emit_to_string(&file, &options).expect("emit");
        assert_eq!(text, "struct Point {x: Int,y: Int}");
    }
}
