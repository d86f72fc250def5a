//! # Code Generation
//!
//! Converts IR programs to ESC/POS or StarPRNT bytes.

use super::ops::{Op, Program};
use crate::protocol::{Codepage, LF, Language, escpos, starprnt};

impl Program {
    /// Compile the IR program to bytes in the given command language.
    ///
    /// Text is encoded with whichever codepage was most recently selected
    /// by a `SetCodepage` op (ASCII until then). `Init` does not reset it.
    pub fn to_bytes(&self, language: Language) -> Vec<u8> {
        let mut out = Vec::new();
        let mut codepage = Codepage::default();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => out.extend(match language {
                    Language::EscPos => escpos::init(),
                    Language::StarPrnt => starprnt::init(),
                }),
                Op::Cut { partial } => out.extend(match language {
                    Language::EscPos => escpos::cut(*partial),
                    Language::StarPrnt => starprnt::cut(*partial),
                }),

                // ===== Style Changes =====
                Op::SetAlign(align) => out.extend(match language {
                    Language::EscPos => escpos::align(*align),
                    Language::StarPrnt => starprnt::align(*align),
                }),
                Op::SetBold(enabled) => out.extend(match language {
                    Language::EscPos => escpos::bold(*enabled),
                    Language::StarPrnt => starprnt::bold(*enabled),
                }),
                Op::SetInvert(enabled) => out.extend(match language {
                    Language::EscPos => escpos::invert(*enabled),
                    Language::StarPrnt => starprnt::invert(*enabled),
                }),
                Op::SetSize { width, height } => out.extend(match language {
                    Language::EscPos => escpos::size(*width, *height),
                    Language::StarPrnt => starprnt::size(*width, *height),
                }),
                Op::SetCodepage(cp) => {
                    codepage = *cp;
                    let cmd = match language {
                        Language::EscPos => escpos::codepage(*cp),
                        Language::StarPrnt => starprnt::codepage(*cp),
                    };
                    if let Some(cmd) = cmd {
                        out.extend(cmd);
                    }
                }

                // ===== Content =====
                Op::Text(s) => out.extend(codepage.encode(s)),
                Op::Newline => out.push(LF),
            }
        }

        out
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Alignment;

    #[test]
    fn test_empty_program() {
        let program = Program::new();
        assert!(program.to_bytes(Language::EscPos).is_empty());
    }

    #[test]
    fn test_init_only() {
        let program: Program = vec![Op::Init].into_iter().collect();
        assert_eq!(program.to_bytes(Language::EscPos), vec![0x1B, 0x40]);
        assert_eq!(program.to_bytes(Language::StarPrnt), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_simple_text() {
        let program: Program = vec![Op::Init, Op::Text("Hello".into()), Op::Newline]
            .into_iter()
            .collect();
        let bytes = program.to_bytes(Language::EscPos);
        assert_eq!(bytes, vec![0x1B, 0x40, b'H', b'e', b'l', b'l', b'o', 0x0A]);
    }

    #[test]
    fn test_styled_text_escpos() {
        let program: Program = vec![
            Op::SetAlign(Alignment::Center),
            Op::SetBold(true),
            Op::Text("A".into()),
            Op::SetBold(false),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            program.to_bytes(Language::EscPos),
            vec![0x1B, 0x61, 0x01, 0x1B, 0x45, 0x01, b'A', 0x1B, 0x45, 0x00]
        );
    }

    #[test]
    fn test_styled_text_starprnt() {
        let program: Program = vec![
            Op::SetAlign(Alignment::Center),
            Op::SetBold(true),
            Op::Text("A".into()),
            Op::SetBold(false),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            program.to_bytes(Language::StarPrnt),
            vec![0x1B, 0x1D, 0x61, 0x01, 0x1B, 0x45, b'A', 0x1B, 0x46]
        );
    }

    #[test]
    fn test_codepage_applies_to_following_text() {
        let program: Program = vec![
            Op::Text("ñ".into()),
            Op::SetCodepage(Codepage::Cp437),
            Op::Text("ñ".into()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            program.to_bytes(Language::EscPos),
            vec![b'?', 0x1B, 0x74, 0x00, 0xA4]
        );
    }

    #[test]
    fn test_ascii_codepage_emits_nothing() {
        let program: Program = vec![Op::SetCodepage(Codepage::Ascii)].into_iter().collect();
        assert!(program.to_bytes(Language::StarPrnt).is_empty());
    }

    #[test]
    fn test_cut() {
        let program: Program = vec![Op::Cut { partial: false }].into_iter().collect();
        assert_eq!(program.to_bytes(Language::EscPos), vec![0x1D, 0x56, 0x41, 0x00]);
        assert_eq!(program.to_bytes(Language::StarPrnt), vec![0x1B, 0x64, 0x02]);
    }
}
