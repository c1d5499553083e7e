//! Assertion helpers shared by the parser unit tests.

/// Run a nom-style parser (`Result<(rest, output), E>`) and compare its output,
/// ignoring whatever input is left over.
#[allow(unused)]
pub fn generic_command_parse<F, I, T, E>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> Result<(I, T), E>,
    T: PartialEq + std::fmt::Debug,
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug,
{
    let result = parser(input.clone());
    let (_rest, res) = match result {
        Ok(parsed) => parsed,
        Err(e) => panic!("parsing {input:?} failed:\r\n{e:#?}"),
    };
    assert_eq!(
        expect, res,
        "The expect:\r\n({expect:?}) should be same with the result:\r\n({res:?}) for input ({input:?})"
    );
}

/// Run a plain function and compare its result.
#[allow(unused)]
pub fn generic_parse<F, I, T>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> T,
    T: PartialEq + std::fmt::Debug,
    I: std::fmt::Debug + Clone,
{
    let result = parser(input.clone());
    assert_eq!(
        expect, result,
        "The expect:\r\n({expect:?}) should be same with the result:\r\n({result:?}) for input ({input:?})"
    );
}
