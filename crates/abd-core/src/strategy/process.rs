//! Strategy backed by an external program speaking the stdio protocol.
//!
//! argv[1] is the raw `identifier,label=value,...` input, stdin carries the
//! stanza bytes, stdout carries metadata (exit 0) or a plugin error (non-zero).
//! The program's stderr is passed through to ours.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use crate::error::DiscoverError;
use crate::identifier::DiscoveryRequest;
use crate::schema::{Metadata, PluginError};
use crate::sources::StrategyConfig;

use super::{binary_name, Strategy};

/// Runs `<strategy_dir>/abd-<strategy>` and waits for it. No timeout.
#[derive(Debug, Clone)]
pub struct ProcessStrategy {
    strategy_dir: PathBuf,
}

impl ProcessStrategy {
    pub fn new(strategy_dir: impl Into<PathBuf>) -> Self {
        Self {
            strategy_dir: strategy_dir.into(),
        }
    }

    /// Path of the program implementing `strategy`; it may not exist.
    pub fn binary_path(&self, strategy: &str) -> PathBuf {
        self.strategy_dir.join(binary_name(strategy))
    }
}

impl Strategy for ProcessStrategy {
    fn resolve(
        &self,
        request: &DiscoveryRequest,
        config: &StrategyConfig,
    ) -> Result<Metadata, DiscoverError> {
        let path = self.binary_path(&config.strategy);
        if !path.exists() {
            return Err(DiscoverError::StrategyBinaryMissing(path));
        }

        tracing::debug!("launching {} {:?}", path.display(), request.raw);
        let mut child = Command::new(&path)
            .arg(&request.raw)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DiscoverError::ProcessLaunch {
                path: path.clone(),
                source,
            })?;

        // The stanza is written while stdout is drained; a program may fill its
        // stdout pipe before it reads stdin. Dropping the handle sends EOF.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|s| {
            let writer = s.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(&config.raw),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (output, written)
        });

        let output = output.map_err(|source| DiscoverError::ProcessIo {
            path: path.clone(),
            source,
        })?;
        if let Err(source) = written {
            // A program may exit without reading its config; that is not our failure.
            if source.kind() != io::ErrorKind::BrokenPipe {
                return Err(DiscoverError::ProcessIo { path, source });
            }
        }
        tracing::debug!(
            "{} exited with {} ({} bytes on stdout)",
            path.display(),
            output.status,
            output.stdout.len()
        );

        interpret(&path, output.status, &output.stdout)
    }
}

/// Maps exit status and captured stdout to a result.
///
/// A failing program whose stdout is not a plugin error (or that was killed
/// by a signal) is reported with its raw exit status.
fn interpret(path: &Path, status: ExitStatus, stdout: &[u8]) -> Result<Metadata, DiscoverError> {
    if status.success() {
        return serde_json::from_slice(stdout).map_err(DiscoverError::MetadataDecode);
    }

    if let Some(code) = status.code() {
        if let Ok(plugin_err) = serde_json::from_slice::<PluginError>(stdout) {
            return Err(DiscoverError::PluginFailed {
                code,
                message: plugin_err.error,
            });
        }
    }

    Err(DiscoverError::ExecutionFailed {
        path: path.to_path_buf(),
        status,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    fn exited(code: i32) -> ExitStatus {
        ExitStatus::from_raw(code << 8)
    }

    #[test]
    fn exit_zero_decodes_metadata() {
        let body = br#"{"identifier":"x","labels":{},"mirrors":[{"artifact":"http://a","signature":"http://a.sig"}]}
"#;
        let m = interpret(Path::new("abd-test"), exited(0), body).unwrap();
        assert_eq!(m.identifier, "x");
        assert_eq!(m.mirrors[0].artifact, "http://a");
        assert_eq!(m.mirrors[0].signature, "http://a.sig");
    }

    #[test]
    fn exit_zero_with_garbage_is_decode_error() {
        let err = interpret(Path::new("abd-test"), exited(0), b"hello").unwrap_err();
        assert!(matches!(err, DiscoverError::MetadataDecode(_)));
    }

    #[test]
    fn non_zero_with_plugin_error() {
        let err = interpret(Path::new("abd-test"), exited(1), br#"{"error":"boom"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('1'), "{msg}");
        assert!(msg.contains("boom"), "{msg}");
        assert!(matches!(err, DiscoverError::PluginFailed { code: 1, .. }));
    }

    #[test]
    fn non_zero_without_plugin_error_keeps_raw_status() {
        let err = interpret(Path::new("abd-test"), exited(2), b"segfault").unwrap_err();
        match err {
            DiscoverError::ExecutionFailed { status, .. } => assert_eq!(status.code(), Some(2)),
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn killed_by_signal_keeps_raw_status() {
        // Raw wait status 9 = terminated by SIGKILL.
        let err = interpret(Path::new("abd-test"), ExitStatus::from_raw(9), br#"{"error":"x"}"#)
            .unwrap_err();
        assert!(matches!(err, DiscoverError::ExecutionFailed { .. }));
    }

    #[test]
    fn missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let strategy = ProcessStrategy::new(dir.path());
        let request = DiscoveryRequest::parse("example.com/app").unwrap();
        let config =
            StrategyConfig::from_bytes(br#"{"prefix":"*","strategy":"nope"}"#.to_vec()).unwrap();
        match strategy.resolve(&request, &config) {
            Err(DiscoverError::StrategyBinaryMissing(p)) => {
                assert_eq!(p, dir.path().join("abd-nope"))
            }
            other => panic!("expected StrategyBinaryMissing, got {other:?}"),
        }
    }
}
