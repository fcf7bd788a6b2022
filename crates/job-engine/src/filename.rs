//! Output filename templates.
//!
//! A template is literal text with bracketed tokens. Substitution is a
//! single left-to-right scan, so text inserted for one token is never
//! rescanned for another.

use discjob_disc_model::FilenameReplacement;

/// Disc title.
pub const TITLE_KEY: &str = "<title>";
/// Preset tag.
pub const PRESET_KEY: &str = "<preset>";
/// Mixdown tags of the selected audio, joined with [`AUDIO_TAG_SEPARATOR`].
pub const AUDIO_CODEC_KEY: &str = "<acodec>";
/// Zero-padded episode number.
pub const EPISODE_NUMBER_KEY: &str = "<epno>";
/// The title's own name.
pub const EPISODE_TITLE_KEY: &str = "<eptitle>";
/// Title of the chapter-range episode being generated.
pub const CHAPTER_RANGE_EPISODE_KEY: &str = "<cetitle>";
/// Zero-width flag: strip it and turn every space of the result into `_`.
pub const SPACES_TO_UNDERSCORE_FLAG: &str = "<$_>";

pub const AUDIO_TAG_SEPARATOR: &str = "+";

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameValues<'a> {
    pub title: &'a str,
    pub preset_tag: &'a str,
    pub audio_tags: &'a [String],
    pub episode_number: &'a str,
    pub episode_title: &'a str,
    pub chapter_episode_title: &'a str,
}

/// Substitute every token of `template`.
pub fn build_filename(template: &str, values: &FilenameValues<'_>) -> String {
    let audio = values.audio_tags.join(AUDIO_TAG_SEPARATOR);
    let tokens: [(&str, &str); 7] = [
        (TITLE_KEY, values.title),
        (PRESET_KEY, values.preset_tag),
        (AUDIO_CODEC_KEY, audio.as_str()),
        (EPISODE_NUMBER_KEY, values.episode_number),
        (EPISODE_TITLE_KEY, values.episode_title),
        (CHAPTER_RANGE_EPISODE_KEY, values.chapter_episode_title),
        (SPACES_TO_UNDERSCORE_FLAG, ""),
    ];

    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        match tokens.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                out.push('<');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);

    if has_spaces_to_underscore_flag(template) {
        out = out.replace(' ', "_");
    }
    out
}

/// Replace every configured character with the replacement text.
pub fn apply_replacement(filename: &str, replacement: &FilenameReplacement) -> String {
    if !replacement.enabled || replacement.characters.is_empty() {
        return filename.to_string();
    }
    filename
        .chars()
        .fold(String::with_capacity(filename.len()), |mut out, c| {
            if replacement.characters.contains(c) {
                out.push_str(&replacement.replacement);
            } else {
                out.push(c);
            }
            out
        })
}

/// Zero-pad an episode number to `precision` digits.
pub fn format_episode_number(number: u32, precision: usize) -> String {
    format!("{number:0precision$}")
}

pub fn has_episode_title_key(template: &str) -> bool {
    template.contains(EPISODE_TITLE_KEY)
}

pub fn has_chapter_range_episode_key(template: &str) -> bool {
    template.contains(CHAPTER_RANGE_EPISODE_KEY)
}

pub fn has_spaces_to_underscore_flag(template: &str) -> bool {
    template.contains(SPACES_TO_UNDERSCORE_FLAG)
}

/// True when the template produces an `.mp4` file.
pub fn is_mp4(template: &str) -> bool {
    std::path::Path::new(template)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}
