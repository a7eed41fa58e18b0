use crate::domain::model::{LuckyResult, THREE_DIGIT_LEN, TWO_DIGIT_LEN};
use crate::domain::ports::DigitSource;
use crate::utils::error::Result;

/// Builds a string of exactly `length` digits, one independent draw per position.
pub fn generate_digits<D: DigitSource + ?Sized>(source: &mut D, length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + source.next_digit() % 10))
        .collect()
}

/// 一次擲號：各產生一組 2 位數與 3 位數
pub fn draw_pair<D: DigitSource + ?Sized>(source: &mut D) -> (String, String) {
    let two = generate_digits(source, TWO_DIGIT_LEN);
    let three = generate_digits(source, THREE_DIGIT_LEN);
    (two, three)
}

pub fn random_result<D: DigitSource + ?Sized>(source: &mut D) -> Result<LuckyResult> {
    let (two, three) = draw_pair(source);
    LuckyResult::random(two, three)
}
