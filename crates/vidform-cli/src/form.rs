//! Interactive form session.
//!
//! Reads one command per line and keeps doing so while a submission is in
//! flight; a `submit` issued in that window is ignored by the session guard.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use vidform_core::{
    local_now, FormSession, GenerationResponse, MediaFile, MediaSlot, Orientation,
    SubmissionController, SubmissionError, SubtitleMode,
};

use crate::{describe_select_error, describe_session, describe_status};

pub const HELP: &str = "\
Commands:
  id <text>                  set the video ID
  audio <path>               select the audio file (max 5MB)
  music <path>               select background music (max 5MB)
  clear-audio | clear-music  empty a file slot
  orientation <landscape|portrait>
  subtitles <with|without>
  submit                     create the video
  status                     show the form
  reset                      start over
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    SetId(String),
    Select(MediaSlot, PathBuf),
    Clear(MediaSlot),
    Orientation(Orientation),
    Subtitles(SubtitleMode),
    Submit,
    Status,
    Reset,
    Help,
    Quit,
}

impl FormCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            // the ID may legitimately be empty
            "id" => FormCommand::SetId(rest.to_string()),
            "audio" => FormCommand::Select(MediaSlot::Audio, require_path(word, rest)?),
            "music" => FormCommand::Select(MediaSlot::BackgroundMusic, require_path(word, rest)?),
            "clear-audio" => FormCommand::Clear(MediaSlot::Audio),
            "clear-music" => FormCommand::Clear(MediaSlot::BackgroundMusic),
            "orientation" => FormCommand::Orientation(rest.parse()?),
            "subtitles" => FormCommand::Subtitles(rest.parse()?),
            "submit" | "send" => FormCommand::Submit,
            "status" => FormCommand::Status,
            "reset" => FormCommand::Reset,
            "help" | "?" => FormCommand::Help,
            "quit" | "exit" => FormCommand::Quit,
            other => anyhow::bail!("Unknown command '{}'. Type 'help' for a list.", other),
        };
        Ok(Some(command))
    }
}

fn require_path(word: &str, rest: &str) -> Result<PathBuf> {
    if rest.is_empty() {
        anyhow::bail!("Usage: {} <path>", word);
    }
    Ok(PathBuf::from(rest))
}

/// Apply a command that only edits the form; returns the line to print.
pub fn apply_edit(session: &mut FormSession, command: FormCommand) -> String {
    match command {
        FormCommand::SetId(id) => {
            session.set_base_id(id);
            format!("Video ID: {}", session.input().base_id)
        }
        FormCommand::Select(slot, path) => match session.select_path(slot, &path) {
            Ok(()) => format!(
                "{}: Uploaded: {}",
                slot,
                session.input().slot(slot).map(MediaFile::name).unwrap_or_default()
            ),
            Err(e) => describe_select_error(&e),
        },
        FormCommand::Clear(slot) => {
            session.clear(slot);
            format!("{}: cleared", slot)
        }
        FormCommand::Orientation(orientation) => {
            session.set_orientation(orientation);
            format!("Orientation: {}", orientation)
        }
        FormCommand::Subtitles(subtitles) => {
            session.set_subtitles(subtitles);
            format!("Subtitles: {}", subtitles)
        }
        FormCommand::Reset => {
            session.reset();
            if session.status().is_submitting() {
                "Form reset. The video being created will still be reported.".to_string()
            } else {
                "Form reset".to_string()
            }
        }
        FormCommand::Status => describe_session(session),
        FormCommand::Help => HELP.to_string(),
        FormCommand::Submit | FormCommand::Quit => String::new(),
    }
}

type InFlight<'c> =
    Pin<Box<dyn Future<Output = Result<GenerationResponse, SubmissionError>> + 'c>>;

async fn wait_for(in_flight: &mut Option<InFlight<'_>>) -> Result<GenerationResponse, SubmissionError> {
    match in_flight {
        Some(request) => request.await,
        None => std::future::pending().await,
    }
}

/// Run the form until `quit` or end of input.
///
/// At end of input an outstanding submission is still awaited; `quit` drops it.
pub async fn run_form<R, W>(
    controller: &SubmissionController,
    session: &mut FormSession,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut in_flight: Option<InFlight<'_>> = None;
    let mut input_open = true;

    while input_open || in_flight.is_some() {
        tokio::select! {
            outcome = wait_for(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                let status = controller.finish(session, outcome);
                writeln!(out, "{}", describe_status(status))?;
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("Failed to read input")? else {
                    input_open = false;
                    continue;
                };
                match FormCommand::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(FormCommand::Quit)) => {
                        if in_flight.is_some() {
                            tracing::warn!("Quitting with a submission in flight");
                        }
                        break;
                    }
                    Ok(Some(FormCommand::Submit)) => {
                        if let Some(payload) = session.begin_submission(local_now()) {
                            writeln!(out, "{}", describe_status(session.status()))?;
                            in_flight = Some(Box::pin(controller.dispatch(payload)));
                        } else if session.input().audio.is_none() {
                            writeln!(out, "Select an audio file first.")?;
                        }
                    }
                    Ok(Some(command)) => writeln!(out, "{}", apply_edit(session, command))?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use vidform_core::{
        Notifier, ReadyNotice, SubmissionPayload, VideoGenerationApi, WorkflowPhase,
    };

    struct SlowApi {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VideoGenerationApi for SlowApi {
        async fn submit(
            &self,
            _payload: &SubmissionPayload,
        ) -> Result<GenerationResponse, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            GenerationResponse::from_slice(self.body.as_bytes())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<ReadyNotice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &ReadyNotice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    fn audio_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("voice.mp3");
        std::fs::write(&path, b"voice").unwrap();
        path
    }

    #[test]
    fn parse_commands() {
        assert_eq!(FormCommand::parse("   ").unwrap(), None);
        assert_eq!(
            FormCommand::parse("id show 1").unwrap(),
            Some(FormCommand::SetId("show 1".to_string()))
        );
        assert_eq!(
            FormCommand::parse("music /tmp/bed.mp3").unwrap(),
            Some(FormCommand::Select(
                MediaSlot::BackgroundMusic,
                PathBuf::from("/tmp/bed.mp3")
            ))
        );
        assert_eq!(
            FormCommand::parse("orientation Portrait").unwrap(),
            Some(FormCommand::Orientation(Orientation::Portrait))
        );
        assert_eq!(
            FormCommand::parse("subtitles with").unwrap(),
            Some(FormCommand::Subtitles(SubtitleMode::With))
        );
        assert_eq!(FormCommand::parse("SUBMIT").unwrap(), Some(FormCommand::Submit));
    }

    #[test]
    fn parse_errors() {
        assert!(FormCommand::parse("audio").is_err());
        assert!(FormCommand::parse("orientation sideways").is_err());
        assert!(FormCommand::parse("dance").is_err());
    }

    #[test]
    fn apply_edit_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.wav");
        std::fs::write(&path, vec![0u8; 5 * 1024 * 1024 + 1]).unwrap();

        let mut session = FormSession::new();
        let message = apply_edit(
            &mut session,
            FormCommand::Select(MediaSlot::Audio, path),
        );
        assert_eq!(message, "Audio file must be under 5MB.");
        assert!(session.audio_file_name().is_none());
    }

    #[test]
    fn apply_edit_selects_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = FormSession::new();

        let message = apply_edit(
            &mut session,
            FormCommand::Select(MediaSlot::Audio, audio_file(&dir)),
        );
        assert_eq!(message, "Audio file: Uploaded: voice.mp3");

        apply_edit(&mut session, FormCommand::Clear(MediaSlot::Audio));
        assert!(session.audio_file_name().is_none());
    }

    #[tokio::test]
    async fn run_form_submits_once_while_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "id show1\naudio {}\nsubmit\nsubmit\norientation portrait\n",
            audio_file(&dir).display()
        );
        let api = Arc::new(SlowApi {
            body: r#"{"video": "https://host/x.mp4"}"#,
            calls: AtomicUsize::new(0),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = SubmissionController::new(api.clone(), notifier.clone());
        let mut session = FormSession::new();
        let mut out = Vec::new();

        run_form(&controller, &mut session, script.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.notices.lock().unwrap().len(), 1);
        assert_eq!(session.phase(), WorkflowPhase::Succeeded);
        assert_eq!(session.input().orientation, Orientation::Portrait);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Status: creating video show1_"));
        assert!(printed.contains("Status: video ready. Download: https://host/x.mp4"));
    }

    #[tokio::test]
    async fn run_form_reset_keeps_request_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let audio = audio_file(&dir);
        let script = format!(
            "id show1\naudio {0}\nsubmit\nreset\naudio {0}\nsubmit\n",
            audio.display()
        );
        let api = Arc::new(SlowApi {
            body: r#"{"video": "https://host/x.mp4"}"#,
            calls: AtomicUsize::new(0),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = SubmissionController::new(api.clone(), notifier.clone());
        let mut session = FormSession::new();
        let mut out = Vec::new();

        run_form(&controller, &mut session, script.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].video_id.starts_with("show1_"));
        assert_eq!(session.phase(), WorkflowPhase::Succeeded);
        assert_eq!(session.audio_file_name(), Some("voice.mp3"));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Form reset. The video being created will still be reported."));
    }

    #[tokio::test]
    async fn run_form_without_audio_sends_nothing() {
        let api = Arc::new(SlowApi {
            body: r#"{"video": "https://host/x.mp4"}"#,
            calls: AtomicUsize::new(0),
        });
        let controller =
            SubmissionController::new(api.clone(), Arc::new(RecordingNotifier::default()));
        let mut session = FormSession::new();
        let mut out = Vec::new();

        run_form(&controller, &mut session, &b"id show1\nsubmit\nquit\n"[..], &mut out)
            .await
            .unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.phase(), WorkflowPhase::Idle);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Select an audio file first."));
    }

    #[tokio::test]
    async fn run_form_reports_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("audio {}\nsubmit\n", audio_file(&dir).display());
        let api = Arc::new(SlowApi {
            body: r#"{"status": "ok"}"#,
            calls: AtomicUsize::new(0),
        });
        let controller =
            SubmissionController::new(api.clone(), Arc::new(RecordingNotifier::default()));
        let mut session = FormSession::new();
        let mut out = Vec::new();

        run_form(&controller, &mut session, script.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(session.phase(), WorkflowPhase::Failed);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Status: failed. Error creating video. Please try again later."));
    }
}
