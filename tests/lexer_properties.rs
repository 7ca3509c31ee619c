use pyscript::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

const START: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const CONTINUE: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_0123456789";

fn random_identifier(rng: &mut StdRng) -> String {
    let len = rng.gen_range(1..12);
    let mut s = String::with_capacity(len);
    s.push(START[rng.gen_range(0..START.len())] as char);
    for _ in 1..len {
        s.push(CONTINUE[rng.gen_range(0..CONTINUE.len())] as char);
    }
    s
}

#[test]
fn identifiers_lex_as_single_reference() {
    let mut rng = StdRng::seed_from_u64(2026);
    for _ in 0..500 {
        let ident = random_identifier(&mut rng);
        if pyscript::token::KEYWORDS.contains(&ident.as_str()) {
            continue;
        }
        let tokens = tokenize(&ident).unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Reference, Value::Ident(ident.clone()))], "{}", ident);
    }
}

#[test]
fn keyword_prefixes_and_extensions() {
    for kw in pyscript::token::KEYWORDS {
        assert_eq!(tokenize(kw).unwrap()[0].kind, TokenKind::Keyword);
        let longer = format!("{}ing", kw);
        assert_eq!(tokenize(&longer).unwrap(), vec![Token::new(TokenKind::Reference, Value::Ident(longer.clone()))]);
    }
}

#[test]
fn integers_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let n: i64 = rng.gen_range(0..i64::MAX);
        assert_eq!(tokenize(&n.to_string()).unwrap(), vec![Token::new(TokenKind::IntLit, Value::Int(n))]);
    }
}

#[test]
fn whitespace_between_tokens_is_irrelevant() {
    let tight = tokenize("var x=f(1,2.5)**2;{return x}").unwrap();
    let loose = tokenize("var  x =\n f ( 1 , 2.5 ) ** 2 ;\n{ return x } # trailing").unwrap();
    assert_eq!(tight, loose);
}

#[test]
fn unknown_characters_report_their_line() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let lines = rng.gen_range(0..10);
        let source = format!("{}?", "x\n".repeat(lines));
        assert_eq!(tokenize(&source).unwrap_err(), LexError::UnknownToken { ch: '?', line: lines + 1 });
    }
}
