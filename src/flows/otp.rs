//! Fixed-width OTP entry.
//!
//! `N` single-digit cells with a focus cursor. Every accepted edit re-checks
//! completeness, and a completed code is reported once per complete state:
//! re-pasting the same code does not report it again, while changing a digit
//! (or clearing and refilling) does.

use super::errors::OtpInputError;

pub const DEFAULT_OTP_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpInput {
    cells: Vec<Option<char>>,
    focus: usize,
    disabled: bool,
    reported: Option<String>,
}

impl Default for OtpInput {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_LENGTH)
    }
}

impl OtpInput {
    /// A zero length is bumped to one cell.
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![None; length.max(1)],
            focus: 0,
            disabled: false,
            reported: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Digits entered so far, in cell order
    pub fn value(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    /// Type into cell `index`. An empty `value` clears the cell.
    /// Returns the full code if this edit completed the input.
    pub fn input(&mut self, index: usize, value: &str) -> Result<Option<String>, OtpInputError> {
        self.ensure_enabled()?;
        self.ensure_in_range(index)?;

        let mut chars = value.chars();
        let digit = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            (Some(c), None) => return Err(OtpInputError::NotADigit(c)),
            (Some(_), Some(_)) => return Err(OtpInputError::TooLong),
        };

        self.cells[index] = digit;
        self.focus = index;
        if digit.is_some() && index + 1 < self.cells.len() {
            self.focus = index + 1;
        }
        Ok(self.check_completion())
    }

    /// Backspace pressed in cell `index`. On an empty cell focus moves back
    /// one position and nothing else is deleted; on a filled cell only that
    /// cell is cleared.
    pub fn backspace(&mut self, index: usize) -> Result<Option<String>, OtpInputError> {
        self.ensure_enabled()?;
        self.ensure_in_range(index)?;

        if self.cells[index].is_some() {
            self.cells[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
        Ok(self.check_completion())
    }

    /// Paste a string across the cells. Input is truncated to the cell count
    /// and each digit lands at its own offset; a non-digit leaves its cell
    /// untouched instead of shifting the rest.
    pub fn paste(&mut self, text: &str) -> Result<Option<String>, OtpInputError> {
        self.ensure_enabled()?;

        for (cell, c) in self.cells.iter_mut().zip(text.chars()) {
            if c.is_ascii_digit() {
                *cell = Some(c);
            }
        }
        Ok(self.check_completion())
    }

    /// Empty every cell and re-arm completion.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.focus = 0;
        self.reported = None;
    }

    fn ensure_enabled(&self) -> Result<(), OtpInputError> {
        if self.disabled {
            return Err(OtpInputError::Disabled);
        }
        Ok(())
    }

    fn ensure_in_range(&self, index: usize) -> Result<(), OtpInputError> {
        if index >= self.cells.len() {
            return Err(OtpInputError::OutOfRange {
                index,
                length: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Forget the last reported code so the same complete code fires again,
    /// e.g. after the service rejected it.
    pub fn rearm(&mut self) {
        self.reported = None;
    }

    fn check_completion(&mut self) -> Option<String> {
        if !self.is_complete() {
            self.reported = None;
            return None;
        }
        let code = self.value();
        if self.reported.as_deref() == Some(code.as_str()) {
            return None;
        }
        self.reported = Some(code.clone());
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_code(otp: &mut OtpInput, code: &str) -> Vec<String> {
        code.chars()
            .enumerate()
            .filter_map(|(i, c)| otp.input(i, &c.to_string()).unwrap())
            .collect()
    }

    #[test]
    fn test_typing_advances_focus_and_completes_once() {
        let mut otp = OtpInput::default();
        assert_eq!(otp.input(0, "4").unwrap(), None);
        assert_eq!(otp.focus(), 1);

        let completions = type_code(&mut otp, "482913");
        assert_eq!(completions, vec!["482913".to_string()]);
        assert_eq!(otp.focus(), 5, "focus stays on the last cell");
    }

    #[test]
    fn test_rearm_reports_same_code_again() {
        let mut otp = OtpInput::default();
        assert_eq!(otp.paste("123456").unwrap(), Some("123456".to_string()));
        assert_eq!(otp.paste("123456").unwrap(), None);

        otp.rearm();
        assert_eq!(otp.paste("123456").unwrap(), Some("123456".to_string()));
    }

    #[test]
    fn test_rejected_input_leaves_state_untouched() {
        let mut otp = OtpInput::default();
        otp.input(0, "1").unwrap();
        let before = otp.clone();

        assert_eq!(otp.input(1, "a"), Err(OtpInputError::NotADigit('a')));
        assert_eq!(otp.input(1, "12"), Err(OtpInputError::TooLong));
        assert_eq!(
            otp.input(6, "1"),
            Err(OtpInputError::OutOfRange { index: 6, length: 6 })
        );
        assert_eq!(otp, before);
    }

    #[test]
    fn test_backspace_on_empty_cell_only_moves_focus() {
        let mut otp = OtpInput::default();
        otp.input(0, "1").unwrap();
        otp.input(1, "2").unwrap();

        otp.backspace(2).unwrap();
        assert_eq!(otp.focus(), 1);
        assert_eq!(otp.value(), "12");

        otp.backspace(1).unwrap();
        assert_eq!(otp.focus(), 1);
        assert_eq!(otp.cells()[1], None);
        assert_eq!(otp.value(), "1");

        let mut fresh = OtpInput::default();
        fresh.backspace(0).unwrap();
        assert_eq!(fresh.focus(), 0);
    }

    #[test]
    fn test_paste_full_code_completes_once() {
        let mut otp = OtpInput::default();
        assert_eq!(otp.paste("123456").unwrap(), Some("123456".to_string()));
        assert_eq!(otp.paste("123456").unwrap(), None, "same complete state");
    }

    #[test]
    fn test_paste_truncates_to_cell_count() {
        let mut otp = OtpInput::new(4);
        assert_eq!(otp.paste("98765432").unwrap(), Some("9876".to_string()));
    }

    #[test]
    fn test_paste_skips_non_digits_positionally() {
        let mut otp = OtpInput::default();
        otp.input(1, "7").unwrap();
        otp.input(4, "8").unwrap();

        assert_eq!(otp.paste("1x3-5").unwrap(), None);
        assert_eq!(
            otp.cells(),
            &[Some('1'), Some('7'), Some('3'), None, Some('5'), None]
        );
    }

    #[test]
    fn test_changed_digit_reports_new_code() {
        let mut otp = OtpInput::default();
        otp.paste("111111").unwrap();
        assert_eq!(otp.input(0, "2").unwrap(), Some("211111".to_string()));
    }

    #[test]
    fn test_clearing_and_refilling_rearms_completion() {
        let mut otp = OtpInput::default();
        otp.paste("123456").unwrap();
        otp.backspace(5).unwrap();
        assert!(!otp.is_complete());
        assert_eq!(otp.input(5, "6").unwrap(), Some("123456".to_string()));
    }

    #[test]
    fn test_disabled_input_rejects_edits() {
        let mut otp = OtpInput::default();
        otp.set_disabled(true);
        assert_eq!(otp.input(0, "1"), Err(OtpInputError::Disabled));
        assert_eq!(otp.paste("123456"), Err(OtpInputError::Disabled));
        assert!(otp.is_empty());
    }
}
