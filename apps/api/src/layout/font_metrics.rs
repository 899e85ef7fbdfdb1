//! Static font-metric table for the card typeface.
//!
//! Cards are set entirely in Helvetica-Bold, one of the PDF standard-14 fonts, so no font
//! program is embedded and the widths below come straight from the Adobe AFM file
//! (glyph advance / 1000, i.e. em units).
//!
//! The table is indexed by WinAnsi byte, not by `char`: text is run through
//! `winansi::encode` first and each byte is looked up at `byte - 0x20`. Characters the
//! encoding cannot represent are therefore measured as the `?` that gets printed.

use crate::layout::winansi;

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// First byte covered by the width table.
const FIRST_CODE: u8 = 0x20;

/// Static character-width table for a standard PDF font.
///
/// Width array slot layout (slot = WinAnsi byte - 0x20):
/// ```text
/// [0..95]    0x20..=0x7E  ASCII
/// [95]       0x7F         unused
/// [96..128]  0x80..=0x9F  typographic extras (€ ‚ ƒ „ … † ‡ ˆ ‰ Š ‹ Œ Ž ‘ ’ “ ” • – — ˜ ™ š › œ ž Ÿ)
/// [128..224] 0xA0..=0xFF  Latin-1
/// ```
#[derive(Debug)]
pub struct FontMetricTable {
    /// PostScript name written to the PDF font dictionary.
    pub base_font: &'static str,
    widths: [f32; 224],
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        winansi::encode(s)
            .into_iter()
            .map(|byte| self.byte_width(byte))
            .sum()
    }

    /// Measures the rendered width of a string in points at `size_pt`.
    pub fn width_at_size(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    fn byte_width(&self, byte: u8) -> f32 {
        byte.checked_sub(FIRST_CODE)
            .and_then(|slot| self.widths.get(usize::from(slot)))
            .copied()
            .unwrap_or(0.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica-Bold, AFM advances. Codes WinAnsi leaves undefined (0x7F, 0x81, 0x8D,
/// 0x8F, 0x90, 0x9D) are never produced by the encoder and carry the `?` width.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // 0x20  sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0x30  0      1      2      3      4      5      6      7      8      9      :      ;      <      =      >      ?
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.333, 0.333, 0.584, 0.584, 0.584, 0.611,
        // 0x40  @      A      B      C      D      E      F      G      H      I      J      K      L      M      N      O
        0.975, 0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833, 0.722, 0.778,
        // 0x50  P      Q      R      S      T      U      V      W      X      Y      Z      [      \      ]      ^      _
        0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611, 0.333, 0.278, 0.333, 0.584, 0.556,
        // 0x60  `      a      b      c      d      e      f      g      h      i      j      k      l      m      n      o
        0.333, 0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889, 0.611, 0.611,
        // 0x70  p      q      r      s      t      u      v      w      x      y      z      {      |      }      ~      del
        0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500, 0.389, 0.280, 0.389, 0.584, 0.611,
        // 0x80  €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.611, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.611, 0.611, 0.611,
        // 0x90  -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.611, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.611, 0.500, 0.667,
        // 0xA0  nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0  °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0  À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0  Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0  à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0  ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
};

/// Returns the metric table for the card typeface.
pub fn get_metrics() -> &'static FontMetricTable {
    &HELVETICA_BOLD_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_em(text: &str, expected: f32) {
        let width = get_metrics().measure_str(text);
        assert!(
            (width - expected).abs() < 1e-3,
            "{text:?} should measure {expected} em, got {width}"
        );
    }

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "wiskunde" = w(.778) i(.278) s(.556) k(.556) u(.611) n(.611) d(.611) e(.556) = 4.557
        assert_em("wiskunde", 4.557);
    }

    #[test]
    fn test_width_at_size_scales_linearly() {
        let metrics = get_metrics();
        let at_12 = metrics.width_at_size("Rust", 12.0);
        let at_6 = metrics.width_at_size("Rust", 6.0);
        assert!((at_12 - 2.0 * at_6).abs() < 1e-4);
    }

    #[test]
    fn test_accented_letter_measures_as_base_letter() {
        let metrics = get_metrics();
        assert_eq!(metrics.measure_str("é"), metrics.measure_str("e"));
        assert_eq!(metrics.measure_str("Ü"), metrics.measure_str("U"));
    }

    #[test]
    fn test_wide_latin1_and_high_block_glyphs_use_full_advance() {
        assert_em(&"Æ".repeat(25), 25.0);
        assert_em(&"—".repeat(25), 25.0);
        assert_em("…‰Œ™", 4.0);
        assert_em("ß", 0.611);
        assert_em("æ", 0.889);
    }

    #[test]
    fn test_unmappable_character_measures_as_question_mark() {
        let metrics = get_metrics();
        assert_eq!(metrics.measure_str("π"), metrics.measure_str("?"));
        assert_em(&"π".repeat(25), 25.0 * 0.611);
    }

    #[test]
    fn test_every_encoded_byte_has_a_width() {
        for byte in FIRST_CODE..=u8::MAX {
            assert!(get_metrics().byte_width(byte) > 0.0, "no width for {byte:#04x}");
        }
    }

    #[test]
    fn test_base_font_is_helvetica_bold() {
        assert_eq!(get_metrics().base_font, "Helvetica-Bold");
    }
}
