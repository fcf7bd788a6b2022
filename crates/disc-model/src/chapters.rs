//! Chapter lists and chapter-name handling.

use serde::{Deserialize, Serialize};

/// A span of disc cells covered by a chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cells {
    pub start: u32,
    pub end: u32,
}

/// One disc-defined chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based, contiguous within a title.
    pub chapter_number: u32,
    #[serde(default)]
    pub cells: Cells,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Display name; defaults to [`Chapter::default_name`].
    pub title: String,
}

impl Chapter {
    pub fn new(chapter_number: u32, duration_secs: f64) -> Self {
        Self {
            chapter_number,
            cells: Cells::default(),
            duration_secs,
            title: default_chapter_name(chapter_number),
        }
    }

    pub fn default_name(&self) -> String {
        default_chapter_name(self.chapter_number)
    }

    pub fn is_default_name(&self) -> bool {
        self.title == self.default_name()
    }

    /// True when the chapter is no longer than `threshold_secs`.
    pub fn is_short(&self, threshold_secs: f64) -> bool {
        self.duration_secs <= threshold_secs
    }
}

fn default_chapter_name(chapter_number: u32) -> String {
    format!("Chapter {chapter_number:02}")
}

/// How chapters are passed to the transcoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterProcessChoice {
    /// No chapter information.
    #[default]
    #[serde(rename = "none")]
    Off,
    /// Chapter markers with the transcoder's own names.
    Markers,
    /// Chapter markers named from a generated chapter-name file.
    Names,
}

/// Result of scanning all chapter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterNameCheck {
    pub has_default_names: bool,
    pub has_custom_names: bool,
}

/// A title's chapters plus how they are exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapters {
    #[serde(default)]
    pub process_choice: ChapterProcessChoice,
    /// Offset for exported numbering only.
    #[serde(default = "default_first_chapter_number")]
    pub first_chapter_number: u32,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

fn default_first_chapter_number() -> u32 {
    1
}

impl Default for Chapters {
    fn default() -> Self {
        Self {
            process_choice: ChapterProcessChoice::Off,
            first_chapter_number: default_first_chapter_number(),
            chapters: Vec::new(),
        }
    }
}

impl Chapters {
    /// Build a chapter list from durations, numbered from 1.
    pub fn from_durations(durations: &[f64]) -> Self {
        Self {
            chapters: durations
                .iter()
                .zip(1..)
                .map(|(&duration, number)| Chapter::new(number, duration))
                .collect(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }

    pub fn lowest_chapter_number(&self) -> Option<u32> {
        self.chapters.iter().map(|c| c.chapter_number).min()
    }

    pub fn highest_chapter_number(&self) -> Option<u32> {
        self.chapters.iter().map(|c| c.chapter_number).max()
    }

    /// Chapter number as shown in exported names.
    pub fn exported_number(&self, chapter: &Chapter) -> u32 {
        (chapter.chapter_number + self.first_chapter_number).saturating_sub(1)
    }

    pub fn check_chapter_names(&self) -> ChapterNameCheck {
        self.chapters
            .iter()
            .fold(ChapterNameCheck::default(), |mut check, chapter| {
                if chapter.is_default_name() {
                    check.has_default_names = true;
                } else {
                    check.has_custom_names = true;
                }
                check
            })
    }

    pub fn reset_names(&mut self) {
        for chapter in &mut self.chapters {
            chapter.title = chapter.default_name();
        }
    }

    /// Chapter-name file contents handed to the transcoder.
    ///
    /// One CRLF-terminated `CHAPTERnnNAME=name` line per chapter, where `nn`
    /// is the 1-based position in the list. With `numbered`, each name is
    /// prefixed with its exported chapter number.
    pub fn names_file_contents(&self, numbered: bool) -> String {
        let mut out = String::new();
        for (position, chapter) in self.chapters.iter().enumerate() {
            let line = if numbered {
                format!(
                    "CHAPTER{:02}NAME={}: {}\r\n",
                    position + 1,
                    self.exported_number(chapter),
                    chapter.title
                )
            } else {
                format!("CHAPTER{:02}NAME={}\r\n", position + 1, chapter.title)
            };
            out.push_str(&line);
        }
        out
    }

    /// Names in the exchange format, one `CHAPTERnnNAME=name` line each.
    pub fn export_names(&self) -> String {
        let mut out = String::new();
        for chapter in &self.chapters {
            out.push_str(&format!(
                "CHAPTER{:02}NAME={}\n",
                chapter.chapter_number, chapter.title
            ));
        }
        out
    }

    /// Apply names from `HEAD=name` lines.
    ///
    /// Lines whose head ends in `NAME` are applied by position, first line
    /// to the first chapter; other lines and surplus names are ignored. When
    /// `short_ending` is given and the last chapter is short and still
    /// carries its default name, it gets that label. Switches to
    /// [`ChapterProcessChoice::Names`]. Returns the number of names applied.
    pub fn import_names(&mut self, text: &str, short_ending: Option<(&str, f64)>) -> usize {
        let names = text
            .lines()
            .filter_map(|line| line.trim_end_matches('\r').split_once('='))
            .filter(|(head, _)| head.trim().ends_with("NAME"))
            .map(|(_, name)| name);

        let mut applied = 0;
        for (chapter, name) in self.chapters.iter_mut().zip(names) {
            chapter.title = name.to_string();
            applied += 1;
        }

        if let Some((label, threshold_secs)) = short_ending {
            if let Some(last) = self.chapters.last_mut() {
                if last.is_short(threshold_secs) && last.is_default_name() {
                    last.title = label.to_string();
                }
            }
        }

        self.process_choice = ChapterProcessChoice::Names;
        applied
    }

    /// Name the last chapter with `label`. Returns its chapter number.
    pub fn set_title_end(&mut self, label: &str) -> Option<u32> {
        let last = self.chapters.last_mut()?;
        last.title = label.to_string();
        Some(last.chapter_number)
    }

    pub fn last(&self) -> Option<&Chapter> {
        self.chapters.last()
    }
}

impl<'a> IntoIterator for &'a Chapters {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Chapters {
        Chapters::from_durations(&[300.0, 420.0, 12.0])
    }

    #[test]
    fn test_default_names() {
        let chapters = sample();
        assert_eq!(chapters.chapters[0].title, "Chapter 01");
        assert_eq!(
            chapters.check_chapter_names(),
            ChapterNameCheck {
                has_default_names: true,
                has_custom_names: false,
            }
        );
        assert_eq!(chapters.lowest_chapter_number(), Some(1));
        assert_eq!(chapters.highest_chapter_number(), Some(3));
    }

    #[test]
    fn test_mixed_names_detected() {
        let mut chapters = sample();
        chapters.chapters[1].title = "The Heist".to_string();
        let check = chapters.check_chapter_names();
        assert!(check.has_default_names && check.has_custom_names);

        chapters.reset_names();
        assert!(!chapters.check_chapter_names().has_custom_names);
    }

    #[test]
    fn test_names_file_uses_position_and_crlf() {
        let mut chapters = sample();
        chapters.chapters[0].chapter_number = 5;
        chapters.chapters[0].title = "Opening".to_string();
        chapters.first_chapter_number = 10;

        let plain = chapters.names_file_contents(false);
        assert!(plain.starts_with("CHAPTER01NAME=Opening\r\n"));
        assert_eq!(plain.matches("\r\n").count(), 3);

        let numbered = chapters.names_file_contents(true);
        assert!(numbered.starts_with("CHAPTER01NAME=14: Opening\r\n"));
        assert!(numbered.contains("CHAPTER02NAME=11: Chapter 02\r\n"));
    }

    #[test]
    fn test_import_is_positional_with_short_ending() {
        let mut chapters = sample();
        let text = "CHAPTER01=00:00:00.000\r\nCHAPTER01NAME=Intro\r\nCHAPTER02=00:05:00.000\r\nCHAPTER02NAME=Middle\r\n";

        let applied = chapters.import_names(text, Some(("end of title", 20.0)));
        assert_eq!(applied, 2);
        assert_eq!(chapters.chapters[0].title, "Intro");
        assert_eq!(chapters.chapters[1].title, "Middle");
        assert_eq!(chapters.chapters[2].title, "end of title");
        assert_eq!(chapters.process_choice, ChapterProcessChoice::Names);
    }

    #[test]
    fn test_import_keeps_custom_last_name() {
        let mut chapters = sample();
        let text = "CHAPTER01NAME=a\nCHAPTER02NAME=b\nCHAPTER03NAME=c\nCHAPTER04NAME=d\n";
        chapters.import_names(text, Some(("end of title", 20.0)));
        assert_eq!(chapters.chapters[2].title, "c");
    }

    #[test]
    fn test_export_then_set_title_end() {
        let mut chapters = sample();
        assert_eq!(
            chapters.export_names(),
            "CHAPTER01NAME=Chapter 01\nCHAPTER02NAME=Chapter 02\nCHAPTER03NAME=Chapter 03\n"
        );
        assert_eq!(chapters.set_title_end("credits"), Some(3));
        assert_eq!(chapters.last().map(|c| c.title.as_str()), Some("credits"));
        assert!(chapters.last().is_some_and(|c| c.is_short(20.0)));
    }

    #[test]
    fn test_process_choice_serde_names() {
        let json = serde_json::to_string(&ChapterProcessChoice::Off).unwrap();
        assert_eq!(json, "\"none\"");
        let names: ChapterProcessChoice = serde_json::from_str("\"names\"").unwrap();
        assert_eq!(names, ChapterProcessChoice::Names);
    }
}
