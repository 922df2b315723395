//! Raw backend record -> normalized `Address`.
//!
//! Pure: no I/O, never mutates the input. The id must be reproducible so a
//! selection made against one rendering of the candidates still resolves after
//! re-rendering.

use super::types::{Address, RawAddress};
use uuid::Uuid;

/// Namespace for content-derived address ids.
const ADDRESS_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93d7_4b51_a0c2_5e8b_7d13_f4a9);

/// Normalize one backend record and attach the house number the user typed.
pub fn transform_address(raw: &RawAddress, house_number: &str) -> Address {
    Address {
        id: address_id(raw, house_number),
        street: raw.street.clone().unwrap_or_default(),
        house_number: house_number.to_string(),
        postcode: raw.postcode.clone().unwrap_or_default(),
        city: raw.city.clone().unwrap_or_default(),
        lat: raw.lat.as_ref().map(|c| c.to_string()),
        long: raw.long.as_ref().map(|c| c.to_string()),
    }
}

/// Identifier for a record: the backend id when present, otherwise a UUIDv5
/// over the house number and the whole record, unmapped fields included.
pub fn address_id(raw: &RawAddress, house_number: &str) -> String {
    if let Some(id) = &raw.id {
        let id = id.to_string();
        if !id.is_empty() {
            return id;
        }
    }

    // `extra` is a sorted map, so the encoding is canonical.
    let mut key = house_number.as_bytes().to_vec();
    key.push(0x1f);
    key.extend(serde_json::to_vec(raw).unwrap_or_default());

    Uuid::new_v5(&ADDRESS_ID_NAMESPACE, &key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::types::Scalar;
    use proptest::prelude::*;

    fn raw(street: &str, postcode: &str, city: &str) -> RawAddress {
        RawAddress {
            street: Some(street.to_string()),
            postcode: Some(postcode.to_string()),
            city: Some(city.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_backend_id_is_used_verbatim() {
        let mut r = raw("Dam", "1012JS", "Amsterdam");
        r.id = Some(Scalar::Text("bag-0363".into()));
        assert_eq!(transform_address(&r, "1").id, "bag-0363");

        r.id = Some(Scalar::Number(42.into()));
        assert_eq!(transform_address(&r, "1").id, "42");
    }

    #[test]
    fn test_distinct_records_get_distinct_ids() {
        let a = transform_address(&raw("Dam", "1012JS", "Amsterdam"), "1");
        let b = transform_address(&raw("Damrak", "1012JS", "Amsterdam"), "1");
        let c = transform_address(&raw("Dam", "1012JS", "Amsterdam"), "2");
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_unmapped_fields_distinguish_records() {
        let mut a = raw("Dam", "1345", "Amsterdam");
        let mut b = a.clone();
        a.extra.insert("addition".into(), "A".into());
        b.extra.insert("addition".into(), "B".into());

        assert_ne!(address_id(&a, "350"), address_id(&b, "350"));
        assert_eq!(address_id(&a, "350"), address_id(&a.clone(), "350"));
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let address = transform_address(&RawAddress::default(), "7");
        assert_eq!(address.street, "");
        assert_eq!(address.city, "");
        assert_eq!(address.house_number, "7");
        assert_eq!(address.lat, None);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let r = raw("Dam", "1012JS", "Amsterdam");
        let before = r.clone();
        let _ = transform_address(&r, "1");
        assert_eq!(r, before);
    }

    proptest! {
        #[test]
        fn house_number_attached_and_id_stable(
            street in ".{0,20}",
            postcode in "[0-9]{4}[A-Z]{0,2}",
            city in ".{0,20}",
            house_number in ".{0,8}",
        ) {
            let r = raw(&street, &postcode, &city);
            let first = transform_address(&r, &house_number);
            let second = transform_address(&r, &house_number);
            prop_assert_eq!(&first.house_number, &house_number);
            prop_assert_eq!(first.id, second.id);
        }
    }
}
