use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::media::{MediaFile, MediaSlot};
use crate::constants::{FIELD_ORIENTATION, FIELD_SUBTITLES, FIELD_VIDEO_ID};

/// Video orientation requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Landscape => "Landscape",
            Orientation::Portrait => "Portrait",
        }
    }

    /// Value sent in the `orientation` field.
    pub fn transport_token(&self) -> &'static str {
        match self {
            Orientation::Landscape => "horizontal",
            Orientation::Portrait => "vertical",
        }
    }
}

/// Whether the generated video carries burned-in subtitles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleMode {
    With,
    #[default]
    Without,
}

impl SubtitleMode {
    pub fn label(&self) -> &'static str {
        match self {
            SubtitleMode::With => "With Subtitles",
            SubtitleMode::Without => "Without Subtitles",
        }
    }

    /// Value sent in the `subtitles` field.
    pub fn transport_token(&self) -> &'static str {
        match self {
            SubtitleMode::With => "yes",
            SubtitleMode::Without => "no",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
}

impl FromStr for Orientation {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "landscape" | "horizontal" | "h" => Ok(Orientation::Landscape),
            "portrait" | "vertical" | "v" => Ok(Orientation::Portrait),
            _ => Err(ParseChoiceError {
                kind: "orientation",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SubtitleMode {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "with" | "with subtitles" | "yes" | "on" => Ok(SubtitleMode::With),
            "without" | "without subtitles" | "no" | "off" => Ok(SubtitleMode::Without),
            _ => Err(ParseChoiceError {
                kind: "subtitle mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SubtitleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user has entered into the form so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub base_id: String,
    pub audio: Option<MediaFile>,
    pub background_music: Option<MediaFile>,
    pub orientation: Orientation,
    pub subtitles: SubtitleMode,
}

impl SubmissionInput {
    pub fn slot(&self, slot: MediaSlot) -> Option<&MediaFile> {
        match slot {
            MediaSlot::Audio => self.audio.as_ref(),
            MediaSlot::BackgroundMusic => self.background_music.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: MediaSlot) -> &mut Option<MediaFile> {
        match slot {
            MediaSlot::Audio => &mut self.audio,
            MediaSlot::BackgroundMusic => &mut self.background_music,
        }
    }
}

/// The request body for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub video_id: String,
    pub audio: MediaFile,
    pub background_music: Option<MediaFile>,
    pub orientation: Orientation,
    pub subtitles: SubtitleMode,
}

impl SubmissionPayload {
    /// Text fields in the order they are sent.
    pub fn text_fields(&self) -> [(&'static str, String); 3] {
        [
            (FIELD_VIDEO_ID, self.video_id.clone()),
            (FIELD_ORIENTATION, self.orientation.transport_token().to_string()),
            (FIELD_SUBTITLES, self.subtitles.transport_token().to_string()),
        ]
    }

    /// File fields; background music is omitted entirely when absent.
    pub fn file_fields(&self) -> Vec<(&'static str, &MediaFile)> {
        let mut fields = vec![(MediaSlot::Audio.field_name(), &self.audio)];
        if let Some(music) = &self.background_music {
            fields.push((MediaSlot::BackgroundMusic.field_name(), music));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(background_music: Option<MediaFile>) -> SubmissionPayload {
        SubmissionPayload {
            video_id: "show1_09-07-02_2024-03-05".to_string(),
            audio: MediaFile::new("voice.mp3", b"voice".to_vec()),
            background_music,
            orientation: Orientation::Portrait,
            subtitles: SubtitleMode::With,
        }
    }

    #[test]
    fn test_transport_tokens_are_exact() {
        assert_eq!(Orientation::Landscape.transport_token(), "horizontal");
        assert_eq!(Orientation::Portrait.transport_token(), "vertical");
        assert_eq!(SubtitleMode::With.transport_token(), "yes");
        assert_eq!(SubtitleMode::Without.transport_token(), "no");
    }

    #[test]
    fn test_defaults() {
        let input = SubmissionInput::default();
        assert_eq!(input.orientation, Orientation::Landscape);
        assert_eq!(input.subtitles, SubtitleMode::Without);
        assert!(input.audio.is_none());
        assert!(input.background_music.is_none());
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!("Portrait".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert_eq!("horizontal".parse::<Orientation>(), Ok(Orientation::Landscape));
        assert_eq!("With Subtitles".parse::<SubtitleMode>(), Ok(SubtitleMode::With));
        assert_eq!(" no ".parse::<SubtitleMode>(), Ok(SubtitleMode::Without));

        let err = "diagonal".parse::<Orientation>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown orientation 'diagonal'");
    }

    #[test]
    fn test_text_fields() {
        let fields = payload(None).text_fields();
        assert_eq!(
            fields,
            [
                ("video_id", "show1_09-07-02_2024-03-05".to_string()),
                ("orientation", "vertical".to_string()),
                ("subtitles", "yes".to_string()),
            ]
        );
    }

    #[test]
    fn test_file_fields_omit_missing_background_music() {
        let without = payload(None);
        let names: Vec<_> = without.file_fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["audio_file"]);

        let with = payload(Some(MediaFile::new("bed.mp3", b"music".to_vec())));
        let fields = with.file_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].0, "background_music");
        assert_eq!(fields[1].1.name(), "bed.mp3");
    }
}
