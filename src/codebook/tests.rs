use crate::{error::CorruptDataError, frequency::FrequencyTable, tree::TreeBuilder};

use super::{Code, Codebook, CodebookEntry};

fn codebook_of(input: &[u8]) -> Codebook {
    Codebook::generate(&TreeBuilder::build(&FrequencyTable::count(input)).unwrap())
}

fn code(s: &str) -> Code {
    s.parse().unwrap()
}

#[test]
fn test_code_push_and_display() {
    let mut c = Code::new();
    for bit in [true, false, true, true, false, false, true, false, true] {
        c.push(bit);
    }

    assert_eq!(c.len(), 9);
    assert_eq!(c.as_bytes(), &[0b1011_0010, 0b1000_0000]);
    assert_eq!(c.to_string(), "101100101");
    assert_eq!(code("101100101"), c);
    assert!("10a".parse::<Code>().is_err());
}

#[test]
fn test_prefix_relation() {
    assert!(code("10").is_prefix_of(&code("101")));
    assert!(code("10").is_prefix_of(&code("10")));
    assert!(!code("11").is_prefix_of(&code("101")));
    assert!(!code("101").is_prefix_of(&code("10")));
}

#[test]
fn test_single_symbol_gets_one_bit() {
    let codebook = codebook_of(b"aaaa");

    assert_eq!(codebook.len(), 1);
    assert_eq!(codebook.get(b'a'), Some(&code("0")));
}

#[test]
fn test_two_symbols() {
    let codebook = codebook_of(b"abb");

    assert_eq!(codebook.get(b'a'), Some(&code("0")));
    assert_eq!(codebook.get(b'b'), Some(&code("1")));
    assert_eq!(codebook.encoded_bits(&FrequencyTable::count(b"abb")), 3);
}

#[test]
fn test_classic_distribution() {
    let table: FrequencyTable = vec![(b'a', 1), (b'b', 1), (b'c', 2), (b'd', 3), (b'e', 5)].into_iter().collect();
    let codebook = Codebook::generate(&TreeBuilder::build(&table).unwrap());

    assert_eq!(codebook.get(b'e'), Some(&code("0")));
    assert_eq!(codebook.get(b'd'), Some(&code("10")));
    assert_eq!(codebook.get(b'c'), Some(&code("110")));
    assert_eq!(codebook.get(b'a'), Some(&code("1110")));
    assert_eq!(codebook.get(b'b'), Some(&code("1111")));

    // A more frequent symbol never gets a strictly longer code
    for (s1, f1) in table.iter() {
        for (s2, f2) in table.iter() {
            if f1 < f2 {
                assert!(codebook.get(s1).unwrap().len() >= codebook.get(s2).unwrap().len());
            }
        }
    }

    assert_eq!(codebook.encoded_bits(&table), 4 + 4 + 6 + 6 + 5);
}

#[test]
fn test_generated_codebooks_are_prefix_free() {
    let inputs: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"abracadabra".to_vec(),
        (0..=255).collect(),
        b"It was the best of times, it was the worst of times".to_vec(),
    ];

    for input in inputs {
        let codebook = codebook_of(&input);
        assert!(codebook.is_prefix_free());
        assert_eq!(codebook.len(), FrequencyTable::count(&input).len());
        assert!(codebook.iter().all(|(_, c)| !c.is_empty()));
    }
}

#[test]
fn test_deep_tree() {
    // Fibonacci frequencies give the most unbalanced tree possible
    let mut fib = vec![1usize, 1];
    while fib.len() < 60 {
        let next = fib[fib.len() - 1] + fib[fib.len() - 2];
        fib.push(next);
    }
    let table: FrequencyTable = fib.iter().enumerate().map(|(s, &f)| (s as u8, f)).collect();

    let codebook = Codebook::generate(&TreeBuilder::build(&table).unwrap());

    assert!(codebook.is_prefix_free());
    assert_eq!(codebook.iter().map(|(_, c)| c.len()).max(), Some(59));
    assert_eq!(codebook.get(59).map(Code::len), Some(1));
}

#[test]
fn test_not_prefix_free() {
    let codebook: Codebook = vec![(b'a', code("0")), (b'b', code("01")), (b'c', code("11"))].into_iter().collect();
    assert!(!codebook.is_prefix_free());

    let codebook: Codebook = vec![(b'a', code("10")), (b'b', code("10"))].into_iter().collect();
    assert!(!codebook.is_prefix_free());
}

#[test]
fn test_entries_round_trip() {
    let codebook = codebook_of(b"The quick brown fox jumps over the lazy dog");

    assert_eq!(Codebook::from_entries(codebook.entries()).unwrap(), codebook);
}

#[test]
fn test_invalid_entries() {
    let empty_code = vec![CodebookEntry { symbol: 1, length: 0, bits: vec![] }];
    assert!(matches!(Codebook::from_entries(empty_code), Err(CorruptDataError::InvalidCodebook(_))));

    let short_bits = vec![CodebookEntry { symbol: 1, length: 9, bits: vec![0] }];
    assert!(matches!(Codebook::from_entries(short_bits), Err(CorruptDataError::InvalidCodebook(_))));

    let dirty_tail = vec![CodebookEntry { symbol: 1, length: 2, bits: vec![0b0100_0001] }];
    assert!(matches!(Codebook::from_entries(dirty_tail), Err(CorruptDataError::InvalidCodebook(_))));

    let duplicate = vec![
        CodebookEntry { symbol: 1, length: 1, bits: vec![0] },
        CodebookEntry { symbol: 1, length: 1, bits: vec![0x80] },
    ];
    assert!(matches!(Codebook::from_entries(duplicate), Err(CorruptDataError::InvalidCodebook(_))));

    let prefix = vec![
        CodebookEntry { symbol: 1, length: 1, bits: vec![0] },
        CodebookEntry { symbol: 2, length: 2, bits: vec![0b0100_0000] },
    ];
    assert!(matches!(Codebook::from_entries(prefix), Err(CorruptDataError::InvalidCodebook(_))));
}

#[test]
fn test_json_uses_triples() {
    let codebook = codebook_of(b"abb");
    let json = serde_json::to_string(&codebook).unwrap();

    assert_eq!(json, r#"[{"symbol":97,"length":1,"bits":[0]},{"symbol":98,"length":1,"bits":[128]}]"#);
    assert_eq!(serde_json::from_str::<Codebook>(&json).unwrap(), codebook);
    assert!(serde_json::from_str::<Codebook>(r#"[{"symbol":97,"length":0,"bits":[]}]"#).is_err());
}

#[test]
fn test_overlong_codes_are_rejected() {
    // 256 prefix-free codes of 65535 bits: 255 ones and a distinct tail byte, zero padded
    let entries: Vec<CodebookEntry> = (0..=255u8)
        .map(|symbol| {
            let mut bits = vec![0xFF; 8191];
            bits.push(symbol & 0xFE);
            CodebookEntry { symbol, length: u16::MAX, bits }
        })
        .collect();

    assert!(matches!(Codebook::from_entries(entries), Err(CorruptDataError::InvalidCodebook(_))));

    // Two symbols never need more than one bit each
    let two = vec![
        CodebookEntry { symbol: 1, length: 1, bits: vec![0] },
        CodebookEntry { symbol: 2, length: 2, bits: vec![0b1000_0000] },
    ];
    assert!(matches!(Codebook::from_entries(two), Err(CorruptDataError::InvalidCodebook(_))));

    // A lone symbol keeps its one-bit code
    let one = vec![CodebookEntry { symbol: 1, length: 1, bits: vec![0] }];
    assert_eq!(Codebook::from_entries(one).unwrap().get(1), Some(&code("0")));
}

#[test]
fn test_deep_tree_entries_are_accepted() {
    let mut fib = vec![1usize, 1];
    while fib.len() < 60 {
        let next = fib[fib.len() - 1] + fib[fib.len() - 2];
        fib.push(next);
    }
    let table: FrequencyTable = fib.iter().enumerate().map(|(s, &f)| (s as u8, f)).collect();
    let codebook = Codebook::generate(&TreeBuilder::build(&table).unwrap());

    assert_eq!(Codebook::from_entries(codebook.entries()).unwrap(), codebook);
}
