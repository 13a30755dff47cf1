//! License text to rich-text (RTF) conversion.
//!
//! Windows Installer license dialogs only render RTF, so plain-text license
//! files are converted before being handed to the linker. Paragraphs are
//! reflowed into single left-aligned blocks; lines indented by the fixed
//! marker width (signature blocks, attribution lines) are rendered centered,
//! one block per line.

/// Indentation marker that flags a line as centered.
///
/// Twelve spaces, matching the convention used by signature blocks in
/// common open-source license files.
pub const CENTER_MARKER: &str = "            ";

/// Fixed RTF preamble emitted before the converted blocks.
///
/// Downstream installer-display components match on the font-table and
/// generator signature, so this is a verbatim template, not generated
/// markup. Line endings inside it are CRLF.
const RTF_HEADER: &str = "{\\rtf1\\ansi\\ansicpg1252\\deff0\\nouicompat\\deflang1033{\\fonttbl{\\f0\\fnil\\fcharset255 Times New Roman;}\r\n{\\*\\generator Riched20 10.0.14393}\\viewkind4\\uc1";

/// A single paragraph of the parsed license document.
///
/// `leading_text` holds the reflowed, left-aligned body; `centered_lines`
/// holds the lines that were indented by [`CENTER_MARKER`] in the source,
/// in input order. Either part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Concatenated, whitespace-trimmed non-indented lines.
    pub leading_text: String,
    /// Marker-indented lines, marker and surrounding whitespace stripped.
    pub centered_lines: Vec<String>,
}

impl Paragraph {
    fn is_empty(&self) -> bool {
        self.leading_text.is_empty() && self.centered_lines.is_empty()
    }
}

/// Converts license text lines into a minimal RTF document.
///
/// Pure transformation: no I/O, cannot fail. Paragraph boundaries are
/// blank lines; consecutive marker-indented lines accumulate into one
/// paragraph's centered block, and a transition between indented and
/// non-indented lines also starts a new paragraph. The trailing paragraph
/// is always flushed, whether or not the input ends with a blank line.
///
/// Line-break positions inside a left-aligned paragraph are not preserved;
/// its lines are joined with single spaces and trimmed.
pub fn license_to_rtf<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    render_document(&segment_paragraphs(lines))
}

/// Splits input lines into [`Paragraph`]s.
fn segment_paragraphs<'a, I>(lines: I) -> Vec<Paragraph>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();
    // Set after a centered line; the next non-indented line starts a new
    // paragraph instead of extending this one.
    let mut break_after_centered = false;

    for line in lines {
        if line.trim().is_empty() {
            flush(&mut paragraphs, &mut current);
            break_after_centered = false;
            continue;
        }

        if line.starts_with(CENTER_MARKER) {
            current.centered_lines.push(line.trim().to_string());
            break_after_centered = true;
        } else {
            if break_after_centered {
                flush(&mut paragraphs, &mut current);
                break_after_centered = false;
            }
            current.leading_text.push(' ');
            current.leading_text.push_str(line);
            current.leading_text = current.leading_text.trim().to_string();
        }
    }

    flush(&mut paragraphs, &mut current);
    paragraphs
}

fn flush(paragraphs: &mut Vec<Paragraph>, current: &mut Paragraph) {
    if !current.is_empty() {
        paragraphs.push(std::mem::take(current));
    }
}

/// Renders parsed paragraphs between the fixed header and closing braces.
fn render_document(paragraphs: &[Paragraph]) -> String {
    let mut out = String::from(RTF_HEADER);

    for paragraph in paragraphs {
        if !paragraph.leading_text.is_empty() {
            out.push_str("\r\n\\pard\\sa200\\f0\\fs22 ");
            out.push_str(&escape_rtf(&paragraph.leading_text));
            out.push_str("\\par");
        }
        for line in &paragraph.centered_lines {
            out.push_str("\r\n\\pard\\sa200\\qc\\f0\\fs22 ");
            out.push_str(&escape_rtf(line));
            out.push_str("\\par");
        }
    }

    // The header leaves the font-table and document groups open.
    out.push_str("\r\n}}\r\n");
    out
}

/// Escapes text for embedding in RTF.
///
/// Control characters `\`, `{`, `}` get backslash escapes; everything
/// outside 7-bit ASCII becomes a `\uN?` unicode escape so the output needs
/// no particular byte encoding.
fn escape_rtf(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            ch if ch.is_ascii() => escaped.push(ch),
            ch => {
                // RTF \uN takes a signed 16-bit decimal; non-BMP chars
                // become UTF-16 surrogate pairs.
                let mut buf = [0u16; 2];
                for unit in ch.encode_utf16(&mut buf) {
                    escaped.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    escaped
}
