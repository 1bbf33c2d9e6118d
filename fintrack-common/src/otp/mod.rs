use rand::rngs::OsRng;
use rand::Rng;

pub struct Otp {}

impl Otp {
    pub fn generate(length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| (b'0' + rng.gen_range(0..10)) as char)
            .collect()
    }

    pub fn are_equal(given: &str, saved: &str) -> bool {
        let given = given.as_bytes();
        let saved = saved.as_bytes();

        if given.len() != saved.len() {
            return false;
        }

        let mut otps_dont_match = 0u8;

        // Do bitwise comparison to prevent timing attacks
        for (i, saved_char) in saved.iter().enumerate() {
            otps_dont_match |= saved_char ^ given[i];
        }

        otps_dont_match == 0
    }
}
