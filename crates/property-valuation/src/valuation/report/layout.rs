//! Text measurement and wrapping for the built-in Helvetica faces.

const MM_PER_PT: f32 = 25.4 / 72.0;
/// Average Helvetica advance as a fraction of the em size.
const REGULAR_ADVANCE: f32 = 0.52;
const BOLD_ADVANCE: f32 = 0.56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Face {
    Regular,
    Bold,
}

impl Face {
    fn advance(self) -> f32 {
        match self {
            Face::Regular => REGULAR_ADVANCE,
            Face::Bold => BOLD_ADVANCE,
        }
    }
}

pub(super) fn pt_to_mm(points: f32) -> f32 {
    points * MM_PER_PT
}

/// Estimated rendered width in millimetres.
pub(super) fn text_width(text: &str, size_pt: f32, face: Face) -> f32 {
    text.chars().count() as f32 * pt_to_mm(size_pt) * face.advance()
}

/// Left edge that centres `text` between `left` and `left + width`.
pub(super) fn centered_x(text: &str, size_pt: f32, face: Face, left: f32, width: f32) -> f32 {
    let measured = text_width(text, size_pt, face);
    left + ((width - measured) / 2.0).max(0.0)
}

/// Word-wraps to `width`; words longer than a line are split.
pub(super) fn wrap(text: &str, size_pt: f32, face: Face, width: f32) -> Vec<String> {
    let per_char = pt_to_mm(size_pt) * face.advance();
    let max_chars = ((width / per_char).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
