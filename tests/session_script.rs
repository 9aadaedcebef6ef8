//! Script-level tests: setting lines, message lines, and five-symbol
//! output grouping through the `Session` layer.

use enigma::error::EnigmaError;
use enigma::{config, Session};

const STANDARD_CONFIG: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
I MQ    (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II ME   (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III MV  (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
IV MJ   (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
V MZ    (AVOLDRWFIUQ) (BZKSMNHYC) (EGTJPX)
BETA N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
GAMMA N (AFNIRLBSQWVXGUZDKMTPECOH) (JY)
B R     (AE) (BN) (CK) (DQ) (FU) (GY) (HI) (JM) (LO) (PW) (RX) (SZ) (TV)
C R     (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)
";

fn session() -> Session {
    Session::new(config::parse(STANDARD_CONFIG).unwrap())
}

/// Frozen snapshots: two messages under two different settings, spaces
/// in the input ignored, output grouped in fives.
#[test]
fn two_message_script() {
    let mut s = session();
    let output = s
        .run(concat!(
            "* B BETA III IV I AAAA\n",
            "FROM HIS SHOULDER HIAWATHA\n",
            "* B BETA I II III MXYZ (HQ) (EX) (IP) (TR) (BY)\n",
            "NOW IS THE TIME\n",
        ))
        .unwrap();
    assert_eq!(
        output,
        vec![
            "KCXUN PCFUS SHXZP ZEUZD FND".to_string(),
            "PIJTK EGGMM WC".to_string(),
        ]
    );
}

/// Feeding ciphertext back under the same setting yields the grouped
/// plaintext.
#[test]
fn script_round_trips() {
    let mut s = session();
    let forward = s
        .run("* B BETA III IV I AAAA\nFROMHISSHOULDERHIAWATHA\n")
        .unwrap();
    let back = s
        .run(&format!("* B BETA III IV I AAAA\n{}\n", forward[0]))
        .unwrap();
    assert_eq!(back, vec!["FROMH ISSHO ULDER HIAWA THA".to_string()]);
}

/// Consecutive message lines under one setting keep stepping: the same
/// plaintext line encrypts differently the second time.
#[test]
fn stepping_continues_across_lines() {
    let mut s = session();
    let output = s
        .run("* B BETA III IV I AAAA\nHELLO\nHELLO\n")
        .unwrap();
    assert_eq!(output[0], "MJNVY");
    assert_eq!(output[1], "XGDSS");
}

/// A ring token between positions and plugboard is recognized.
#[test]
fn ring_token_in_setting_line() {
    let mut s = session();
    let output = s
        .run("* B BETA III IV I AAAA AAAB\nHELLO\n")
        .unwrap();
    assert_eq!(output, vec!["JZONQ".to_string()]);
}

#[test]
fn input_must_start_with_setting_line() {
    let mut s = session();
    assert_eq!(
        s.run("HELLO\n").unwrap_err(),
        EnigmaError::MissingSettingLine
    );
    assert_eq!(
        s.run("").unwrap_err(),
        EnigmaError::TruncatedInput("setting line")
    );
}

#[test]
fn setting_line_errors_are_typed() {
    let mut s = session();
    assert_eq!(
        s.run("* B BETA III IV\n").unwrap_err(),
        EnigmaError::TruncatedInput("setting line")
    );
    assert_eq!(
        s.run("* B BETA III IV I\n").unwrap_err(),
        EnigmaError::TruncatedInput("rotor positions")
    );
    assert_eq!(
        s.run("* B BETA III IV IX AAAA\n").unwrap_err(),
        EnigmaError::UnknownRotor("IX".to_string())
    );
    assert_eq!(
        s.run("* B BETA III IV I AAA\n").unwrap_err(),
        EnigmaError::WrongSettingLength {
            expected: 4,
            actual: 3
        }
    );
    assert_eq!(
        s.run("* B BETA III III I AAAA\n").unwrap_err(),
        EnigmaError::RotorAlreadyInstalled("III".to_string())
    );
}

/// A message with a symbol outside the alphabet aborts at that line.
#[test]
fn foreign_symbol_aborts() {
    let mut s = session();
    assert_eq!(
        s.run("* B BETA III IV I AAAA\nHELLO!\n").unwrap_err(),
        EnigmaError::SymbolNotInAlphabet('!')
    );
}
