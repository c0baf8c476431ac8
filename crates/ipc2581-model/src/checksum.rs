use crate::{Ipc2581Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use md5::{Digest, Md5};
use std::ops::Range;

/// Splits `xml` after its last `>`. The remainder, trimmed, is the optional
/// checksum trailer; a base64 digest never contains `>`.
pub fn split_trailer(xml: &str) -> (&str, Option<&str>) {
    let end = xml.rfind('>').map_or(0, |i| i + 1);
    let trailer = xml[end..].trim();
    (&xml[..end], (!trailer.is_empty()).then_some(trailer))
}

/// Verifies a trailer against the base64 MD5 of the root element's text.
///
/// `root` is the byte range of the root element inside `markup`, from its
/// opening `<` through the end of its closing tag. A trailer that is not a
/// 16-byte base64 digest is ignored.
pub fn validate_checksum(markup: &str, root: Range<usize>, trailer: &str) -> Result<()> {
    let Ok(expected) = STANDARD.decode(trailer) else {
        log::debug!("ignoring non-base64 trailer after the root element");
        return Ok(());
    };
    if expected.len() != 16 {
        log::debug!("ignoring {}-byte trailer, not an MD5 digest", expected.len());
        return Ok(());
    }

    let Some(span) = markup.get(root) else {
        return Err(Ipc2581Error::InvalidStructure(
            "root element range lies outside the document text".to_string(),
        ));
    };

    let actual = Md5::digest(span.as_bytes());
    if expected[..] != actual[..] {
        return Err(Ipc2581Error::ChecksumMismatch {
            expected: trailer.to_string(),
            actual: STANDARD.encode(actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<IPC-2581 revision="C">
  <Content roleRef="Owner"/>
</IPC-2581>"#;

    fn root_range(markup: &str) -> Range<usize> {
        let start = markup.find("<IPC-2581").unwrap();
        start..markup.len()
    }

    #[test]
    fn no_trailer() {
        let xml = format!("<?xml version=\"1.0\"?>\n{}\n", BODY);
        let (markup, trailer) = split_trailer(&xml);
        assert!(markup.ends_with("</IPC-2581>"));
        assert_eq!(trailer, None);
    }

    #[test]
    fn valid_checksum() {
        let digest = STANDARD.encode(Md5::digest(BODY.as_bytes()));
        let xml = format!("<?xml version=\"1.0\"?>\n{}\n{}\n", BODY, digest);
        let (markup, trailer) = split_trailer(&xml);
        assert_eq!(trailer, Some(digest.as_str()));
        assert!(validate_checksum(markup, root_range(markup), &digest).is_ok());
    }

    #[test]
    fn mismatch_reports_both_digests() {
        let wrong = STANDARD.encode(Md5::digest(b"something else"));
        let xml = format!("{}\n{}", BODY, wrong);
        let (markup, trailer) = split_trailer(&xml);

        match validate_checksum(markup, root_range(markup), trailer.unwrap()) {
            Err(Ipc2581Error::ChecksumMismatch { expected, actual }) => {
                assert_eq!(expected, wrong);
                assert_eq!(actual, STANDARD.encode(Md5::digest(BODY.as_bytes())));
            }
            other => panic!("expected checksum mismatch, got {:?}", other),
        }
    }

    #[test]
    fn non_digest_trailer_is_ignored() {
        let (markup, _) = split_trailer(BODY);
        assert!(validate_checksum(markup, root_range(markup), "not a digest!").is_ok());
        assert!(validate_checksum(markup, root_range(markup), "AAAA").is_ok());
    }

    #[test]
    fn out_of_bounds_range_is_an_error() {
        assert!(matches!(
            validate_checksum(BODY, 10..4, "AAAAAAAAAAAAAAAAAAAAAA=="),
            Err(Ipc2581Error::InvalidStructure(_))
        ));
    }
}
