use super::*;

const SAMPLE_PAGE: &str = r#"{
    "data": [
        {
            "id": 1,
            "attributes": {
                "title": "Boba Fett",
                "subtitle": "Collecting the Bounty",
                "artist": "Ardian Syaf",
                "cardNumber": 1,
                "cardCount": 252,
                "cost": 7,
                "hp": 7,
                "power": 4,
                "unique": true,
                "hyperspace": false,
                "showcase": false,
                "artFrontHorizontal": false,
                "createdAt": "2023-11-08T18:15:06.103Z",
                "locale": "en",
                "artFront": { "data": { "id": 5, "attributes": { "formats": {
                    "card": { "name": "bf.png", "url": "https://cdn.example/bf.png" },
                    "xxsmall": { "name": "bf-xs.png", "url": "https://cdn.example/bf-xs.png" }
                } } } },
                "artBack": { "data": null },
                "artThumbnail": { "data": { "id": 6, "attributes": { "formats": {
                    "card": { "name": "bf-t.png", "url": "https://cdn.example/bf-t.png" }
                } } } },
                "aspects": { "data": [
                    { "id": 1, "attributes": { "name": "Cunning" } }
                ] },
                "aspectDuplicates": { "data": [] },
                "traits": { "data": [
                    { "id": 1, "attributes": { "name": "Underworld" } },
                    { "id": 2, "attributes": { "name": "Bounty Hunter" } }
                ] },
                "arenas": { "data": [
                    { "id": 1, "attributes": { "name": "Ground" } }
                ] },
                "type": { "data": { "id": 3, "attributes": { "value": "Unit" } } },
                "rarity": { "data": { "id": 4, "attributes": { "name": "Legendary" } } },
                "expansion": { "data": { "id": 2, "attributes": { "code": "SOR" } } },
                "variantOf": { "data": null },
                "variants": { "data": [] }
            }
        }
    ],
    "meta": { "pagination": { "page": 3, "pageSize": 50, "pageCount": 11, "total": 530 } }
}"#;

#[test]
fn parse_empty_page_reader() {
    read_card_list_page(std::io::empty()).unwrap_err();
}

#[test]
fn parse_sample_page() {
    let page = read_card_list_page(SAMPLE_PAGE.as_bytes()).unwrap();
    assert_eq!(page.meta.pagination.page, 3);
    assert_eq!(page.meta.pagination.page_count, 11);
    assert_eq!(page.data.len(), 1);

    let attributes = &page.data[0].attributes;
    assert_eq!(attributes.title.as_deref(), Some("Boba Fett"));
    assert_eq!(attributes.card_number, Some(1));
    assert_eq!(attributes.unique, Some(true));
    assert_eq!(
        attributes.expansion.attributes().map(|e| e.code.as_str()),
        Some("SOR")
    );
    assert_eq!(
        attributes.card_type.attributes().map(|t| t.value.as_str()),
        Some("Unit")
    );
    assert!(!attributes.variant_of.is_present());
    assert!(attributes.variants.is_empty());
    assert_eq!(attributes.arenas.len(), 1);

    let front = attributes.art_front.attributes().unwrap();
    assert_eq!(front.formats.len(), 2);
    assert_eq!(front.formats["card"].url, "https://cdn.example/bf.png");
    assert!(attributes.art_back.attributes().is_none());
}

#[test]
fn absent_attributes_default_rather_than_fail() {
    // Upstream rows are inconsistently populated; every field the
    // normalizer treats as optional-or-checked must tolerate omission.
    let page = read_card_list_page(
        r#"{ "data": [ { "id": 9, "attributes": {} } ],
            "meta": { "pagination": { "page": 1, "pageCount": 1 } } }"#
            .as_bytes(),
    )
    .unwrap();

    let attributes = &page.data[0].attributes;
    assert_eq!(attributes.title, None);
    assert_eq!(attributes.cost, None);
    assert_eq!(attributes.unique, None);
    assert!(attributes.art_front.attributes().is_none());
    assert!(attributes.aspects.is_empty());
    assert!(!attributes.variant_of.is_present());
}

#[test]
fn null_booleans_parse_as_absent() {
    let page = read_card_list_page(
        r#"{ "data": [ { "id": 9, "attributes": {
                "unique": null, "hyperspace": null, "showcase": null
            } } ],
            "meta": { "pagination": { "page": 1, "pageCount": 1 } } }"#
            .as_bytes(),
    )
    .unwrap();

    let attributes = &page.data[0].attributes;
    assert_eq!(attributes.unique, None);
    assert_eq!(attributes.hyperspace, None);
    assert_eq!(attributes.showcase, None);
}

#[test]
fn art_formats_default_to_empty_when_missing() {
    let page = read_card_list_page(
        r#"{ "data": [ { "id": 9, "attributes": {
                "artFront": { "data": { "id": 1, "attributes": {} } }
            } } ],
            "meta": { "pagination": { "page": 1, "pageCount": 1 } } }"#
            .as_bytes(),
    )
    .unwrap();

    let front = page.data[0].attributes.art_front.attributes().unwrap();
    assert!(front.formats.is_empty());
}
