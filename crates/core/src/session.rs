//! The core session task.
//!
//! A session owns the build-then-deploy pipeline. It receives [`Op`]s from
//! the TUI, runs the requested work sequentially, and reports progress back
//! as [`Event`]s. Ops queue up behind the one in flight, so there is never
//! more than one build or deploy running.

use crate::build::Builder;
use crate::deploy::deploy_skill;
use sk_protocol::ipc::{Event, Op};
use sk_protocol::manifest::Manifest;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

/// Channel ends for talking to a spawned session.
pub struct SessionHandle {
    /// Send operations to the session.
    pub op_tx: UnboundedSender<Op>,
    /// Receive progress events from the session.
    pub event_rx: UnboundedReceiver<Event>,
    /// The session task itself, for a clean join on shutdown.
    pub task: JoinHandle<()>,
}

impl SessionHandle {
    /// Spawns the session task with the given builder.
    pub fn spawn<B: Builder + 'static>(builder: B) -> Self {
        let (op_tx, mut op_rx) = unbounded_channel::<Op>();
        let (event_tx, event_rx) = unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            while let Some(op) = op_rx.recv().await {
                match op {
                    Op::StartDeploy {
                        root,
                        manifest,
                        deploy_dir,
                        values,
                    } => {
                        run_deploy(&builder, &event_tx, root, manifest, deploy_dir, values)
                            .await;
                    }
                    Op::Shutdown => break,
                }
            }
        });

        Self {
            op_tx,
            event_rx,
            task,
        }
    }
}

/// Runs one build-then-deploy pipeline, emitting events along the way.
///
/// Event order: `BuildStarted`, any number of `BuildOutput`, then exactly one
/// of `BuildFailed`, `DeployFinished`, or `DeployFailed`. Skills without a
/// build step skip straight to the deploy events.
async fn run_deploy(
    builder: &dyn Builder,
    event_tx: &UnboundedSender<Event>,
    root: PathBuf,
    manifest: Manifest,
    deploy_dir: PathBuf,
    values: BTreeMap<String, String>,
) {
    if let Some(config) = &manifest.build {
        let _ = event_tx.send(Event::BuildStarted {
            skill: manifest.name.clone(),
        });

        let mut stream = match builder.build(&root, config).await {
            Ok(stream) => stream,
            Err(e) => {
                let _ = event_tx.send(Event::BuildFailed {
                    message: e.to_string(),
                });
                return;
            }
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(line) => {
                    let _ = event_tx.send(Event::BuildOutput {
                        line: line.text().to_string(),
                    });
                }
                Err(e) => {
                    let _ = event_tx.send(Event::BuildFailed {
                        message: e.to_string(),
                    });
                    return;
                }
            }
        }
    }

    match deploy_skill(&root, &manifest, &deploy_dir, &values) {
        Ok(report) => {
            let _ = event_tx.send(Event::DeployFinished { report });
        }
        Err(e) => {
            let _ = event_tx.send(Event::DeployFailed {
                message: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::MockBuilder;
    use std::fs;
    use tempfile::tempdir;

    fn manifest(yaml: &str, skill_dir: &std::path::Path) -> Manifest {
        let mut manifest: Manifest = serde_yaml::from_str(yaml).expect("manifest yaml");
        manifest.path = skill_dir.to_path_buf();
        manifest
    }

    async fn collect_until_terminal(handle: &mut SessionHandle) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = handle.event_rx.recv().await {
            let terminal = matches!(
                event,
                Event::BuildFailed { .. } | Event::DeployFinished { .. } | Event::DeployFailed { .. }
            );
            events.push(event);
            if terminal {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_session_deploys_skill_without_build_step() {
        let workspace = tempdir().expect("temp dir");
        let skill_dir = workspace.path().join("skills/plain");
        fs::create_dir_all(&skill_dir).expect("skill dir");

        let mut handle = SessionHandle::spawn(MockBuilder::success());
        handle
            .op_tx
            .send(Op::StartDeploy {
                root: workspace.path().to_path_buf(),
                manifest: manifest("name: plain\n", &skill_dir),
                deploy_dir: workspace.path().join("out/plain"),
                values: BTreeMap::new(),
            })
            .expect("send op");

        let events = collect_until_terminal(&mut handle).await;

        // No build section, so no build events at all.
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::DeployFinished { report } => assert_eq!(report.skill, "plain"),
            other => panic!("Expected DeployFinished, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_streams_build_output_then_deploys() {
        let workspace = tempdir().expect("temp dir");
        let skill_dir = workspace.path().join("skills/demo");
        fs::create_dir_all(&skill_dir).expect("skill dir");

        // The mock build does not produce an artifact, so fake one.
        let release = workspace.path().join("target/release");
        fs::create_dir_all(&release).expect("release dir");
        fs::write(release.join("demo"), b"bin").expect("artifact");

        let mut handle = SessionHandle::spawn(MockBuilder::success());
        handle
            .op_tx
            .send(Op::StartDeploy {
                root: workspace.path().to_path_buf(),
                manifest: manifest("name: demo\nbuild:\n  package: skill-demo\n", &skill_dir),
                deploy_dir: workspace.path().join("out/demo"),
                values: BTreeMap::new(),
            })
            .expect("send op");

        let events = collect_until_terminal(&mut handle).await;

        assert!(matches!(&events[0], Event::BuildStarted { skill } if skill == "demo"));
        let outputs = events
            .iter()
            .filter(|e| matches!(e, Event::BuildOutput { .. }))
            .count();
        assert_eq!(outputs, 2);
        assert!(matches!(events.last(), Some(Event::DeployFinished { .. })));
    }

    #[tokio::test]
    async fn test_session_stops_on_build_failure() {
        let workspace = tempdir().expect("temp dir");
        let skill_dir = workspace.path().join("skills/demo");
        fs::create_dir_all(&skill_dir).expect("skill dir");

        let mut handle = SessionHandle::spawn(MockBuilder::failing());
        handle
            .op_tx
            .send(Op::StartDeploy {
                root: workspace.path().to_path_buf(),
                manifest: manifest("name: demo\nbuild:\n  package: skill-demo\n", &skill_dir),
                deploy_dir: workspace.path().join("out/demo"),
                values: BTreeMap::new(),
            })
            .expect("send op");

        let events = collect_until_terminal(&mut handle).await;

        match events.last() {
            Some(Event::BuildFailed { message }) => {
                assert!(message.contains("exit code 101"));
            }
            other => panic!("Expected BuildFailed, got {other:?}"),
        }

        // Nothing was installed.
        assert!(!workspace.path().join("out/demo").exists());
    }

    #[tokio::test]
    async fn test_session_reports_deploy_failure_after_build() {
        let workspace = tempdir().expect("temp dir");
        let skill_dir = workspace.path().join("skills/demo");
        fs::create_dir_all(&skill_dir).expect("skill dir");

        // Successful build, but no artifact appears: the deploy step fails.
        let mut handle = SessionHandle::spawn(MockBuilder::success());
        handle
            .op_tx
            .send(Op::StartDeploy {
                root: workspace.path().to_path_buf(),
                manifest: manifest("name: demo\nbuild:\n  package: skill-demo\n", &skill_dir),
                deploy_dir: workspace.path().join("out/demo"),
                values: BTreeMap::new(),
            })
            .expect("send op");

        let events = collect_until_terminal(&mut handle).await;

        match events.last() {
            Some(Event::DeployFailed { message }) => {
                assert!(message.contains("not found"));
            }
            other => panic!("Expected DeployFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_shutdown_ends_task() {
        let handle = SessionHandle::spawn(MockBuilder::success());

        handle.op_tx.send(Op::Shutdown).expect("send shutdown");
        handle.task.await.expect("session task panicked");
    }
}
