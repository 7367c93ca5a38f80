use super::error::DecodeError;
use super::layout;
use crate::source::ByteSource;
use crate::{Length, Tag, TagClass};

/// Read one tag field.
///
/// Returns `Ok(None)` when the source ends cleanly before the first byte.
/// A missing continuation byte is `Truncated`; a tag number that no longer
/// fits in u64 is `TagOverflow`.
pub(crate) fn read_tag<S: ByteSource>(source: &mut S) -> Result<Option<Tag>, DecodeError> {
    let first = match source.next_byte()? {
        Some(byte) => byte,
        None => return Ok(None),
    };

    let class = match first & layout::CLASS_MASK {
        layout::CLASS_UNIVERSAL => TagClass::Universal,
        layout::CLASS_APPLICATION => TagClass::Application,
        layout::CLASS_CONTEXT_SPECIFIC => TagClass::ContextSpecific,
        layout::CLASS_PRIVATE => TagClass::Private,
        // The mask leaves only the four values above.
        _ => unreachable!(),
    };
    let primitive = first & layout::CONSTRUCTED_BIT == 0;

    let mut nbytes = 1u64;
    let mut number = u64::from(first & layout::TAG_NUMBER_MASK);

    if number == u64::from(layout::TAG_NUMBER_MASK) {
        // Long form: the number is a base-128 sequence, high bit set on
        // every byte but the last.
        number = 0;
        loop {
            let byte = source
                .next_byte()?
                .ok_or(DecodeError::Truncated { context: "tag" })?;
            nbytes += 1;
            if number > u64::MAX >> 7 {
                return Err(DecodeError::TagOverflow { nbytes });
            }
            number = (number << 7) | u64::from(byte & layout::LOW_SEVEN_MASK);
            if byte & layout::HIGH_BIT == 0 {
                break;
            }
        }
    }

    Ok(Some(Tag {
        class,
        primitive,
        number,
        nbytes,
    }))
}

/// Read one length field.
///
/// Short form carries the value in the low seven bits. Long form declares a
/// count of big-endian octets; a count of zero is the indefinite form,
/// whose termination is deferred to the end-of-contents marker.
pub(crate) fn read_length<S: ByteSource>(source: &mut S) -> Result<Length, DecodeError> {
    let first = source
        .next_byte()?
        .ok_or(DecodeError::Truncated { context: "length" })?;

    if first & layout::HIGH_BIT == 0 {
        return Ok(Length {
            value: u64::from(first),
            nbytes: 1,
            indefinite: false,
        });
    }

    let count = first & layout::LOW_SEVEN_MASK;
    if count == 0 {
        return Ok(Length {
            value: 0,
            nbytes: 1,
            indefinite: true,
        });
    }

    let mut value = 0u64;
    let mut nbytes = 1u64;
    for _ in 0..count {
        let byte = source
            .next_byte()?
            .ok_or(DecodeError::Truncated { context: "length" })?;
        nbytes += 1;
        if value > u64::MAX >> 8 {
            return Err(DecodeError::LengthOverflow { nbytes });
        }
        value = (value << 8) | u64::from(byte);
    }

    Ok(Length {
        value,
        nbytes,
        indefinite: false,
    })
}

#[cfg(test)]
mod tests {
    use super::{read_length, read_tag};
    use crate::TagClass;
    use crate::ber::error::DecodeError;
    use crate::source::ReadSource;

    #[test]
    fn read_short_form_tag() {
        let mut source = ReadSource::new(&[0x02u8][..]);
        let tag = read_tag(&mut source).unwrap().unwrap();
        assert_eq!(tag.class, TagClass::Universal);
        assert!(tag.primitive);
        assert_eq!(tag.number, 2);
        assert_eq!(tag.nbytes, 1);
    }

    #[test]
    fn read_constructed_context_tag() {
        let mut source = ReadSource::new(&[0xa3u8][..]);
        let tag = read_tag(&mut source).unwrap().unwrap();
        assert_eq!(tag.class, TagClass::ContextSpecific);
        assert!(!tag.primitive);
        assert_eq!(tag.number, 3);
    }

    #[test]
    fn read_long_form_tag() {
        // 0x1f marks the long form; 0x81 0x00 encodes (1 << 7) | 0 = 128.
        let mut source = ReadSource::new(&[0x1fu8, 0x81, 0x00][..]);
        let tag = read_tag(&mut source).unwrap().unwrap();
        assert_eq!(tag.number, 128);
        assert_eq!(tag.nbytes, 3);
    }

    #[test]
    fn read_tag_at_end_of_input() {
        let bytes: &[u8] = &[];
        let mut source = ReadSource::new(bytes);
        assert!(read_tag(&mut source).unwrap().is_none());
    }

    #[test]
    fn read_tag_missing_continuation() {
        let mut source = ReadSource::new(&[0x1fu8, 0x81][..]);
        let err = read_tag(&mut source).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { context: "tag" }));
    }

    #[test]
    fn read_tag_number_overflow() {
        let mut bytes: Vec<u8> = vec![0x1f];
        bytes.extend(std::iter::repeat(0xff).take(10));
        bytes.push(0x7f);
        let mut source = ReadSource::new(&bytes[..]);
        let err = read_tag(&mut source).unwrap_err();
        assert!(matches!(err, DecodeError::TagOverflow { .. }));
    }

    #[test]
    fn read_short_form_length() {
        let mut source = ReadSource::new(&[0x05u8][..]);
        let length = read_length(&mut source).unwrap();
        assert_eq!(length.value, 5);
        assert_eq!(length.nbytes, 1);
        assert!(!length.indefinite);
    }

    #[test]
    fn read_long_form_length() {
        let mut source = ReadSource::new(&[0x81u8, 0x80][..]);
        let length = read_length(&mut source).unwrap();
        assert_eq!(length.value, 128);
        assert_eq!(length.nbytes, 2);
        assert!(!length.indefinite);
    }

    #[test]
    fn read_two_octet_length() {
        let mut source = ReadSource::new(&[0x82u8, 0x02, 0x10][..]);
        let length = read_length(&mut source).unwrap();
        assert_eq!(length.value, 0x0210);
        assert_eq!(length.nbytes, 3);
    }

    #[test]
    fn read_indefinite_length() {
        let mut source = ReadSource::new(&[0x80u8][..]);
        let length = read_length(&mut source).unwrap();
        assert_eq!(length.value, 0);
        assert_eq!(length.nbytes, 1);
        assert!(length.indefinite);
    }

    #[test]
    fn read_length_at_end_of_input() {
        let bytes: &[u8] = &[];
        let mut source = ReadSource::new(bytes);
        let err = read_length(&mut source).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { context: "length" }));
    }

    #[test]
    fn read_length_missing_octets() {
        let mut source = ReadSource::new(&[0x82u8, 0x01][..]);
        let err = read_length(&mut source).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { context: "length" }));
    }

    #[test]
    fn read_length_overflow() {
        // Nine non-zero octets cannot fit in a u64.
        let mut bytes: Vec<u8> = vec![0x89];
        bytes.extend(std::iter::repeat(0xff).take(9));
        let mut source = ReadSource::new(&bytes[..]);
        let err = read_length(&mut source).unwrap_err();
        assert!(matches!(err, DecodeError::LengthOverflow { .. }));
    }

    #[test]
    fn read_length_with_leading_zero_octets() {
        // Nine octets, but a leading zero keeps the value inside u64.
        let mut bytes = vec![0x89, 0x00];
        bytes.extend(std::iter::repeat(0xffu8).take(8));
        let mut source = ReadSource::new(&bytes[..]);
        let length = read_length(&mut source).unwrap();
        assert_eq!(length.value, u64::MAX);
        assert_eq!(length.nbytes, 10);
    }
}
