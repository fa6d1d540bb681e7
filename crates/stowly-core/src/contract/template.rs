// ── Contract template ──
//
// Builds the fixed legal document as a block list, interpolating the
// customer / unit / center / pricing fields from the contract record.
// Section order and wording are part of the legal layout and must not
// be reordered.

use crate::contract::blocks::Block;
use crate::contract::{format_date, format_eur, FILING_FEE_EUR, SECURITY_DEPOSIT_EUR};
use crate::model::ContractRecord;

/// Fixed company boilerplate for the "La Société" section.
const COMPANY_BOILERPLATE: &str = "STOWLY SAS, société par actions simplifiée au capital de \
     120 000€, immatriculée au RCS de Lyon sous le numéro 912 407 553, dont le siège social \
     est situé au 8 avenue Georges Pompidou, 69003 Lyon, représentée par son président en \
     exercice, ci-après dénommée « la Société ».";

/// Static correspondence address shown under the letterhead.
const CORRESPONDENCE_ADDRESS: [&str; 3] = [
    "STOWLY SAS -- Service Clients",
    "8 avenue Georges Pompidou",
    "69003 Lyon, France",
];

/// Build the full contract block list from a record.
pub fn contract_blocks(record: &ContractRecord) -> Vec<Block> {
    let ctx = &record.context;
    let customer = &ctx.customer;
    let unit = &ctx.unit;

    let mut blocks = vec![
        Block::Letterhead {
            company: "STOWLY".into(),
            tagline: "Solutions de self-stockage".into(),
        },
        Block::AddressBlock {
            lines: CORRESPONDENCE_ADDRESS.iter().map(|&l| l.to_owned()).collect(),
        },
        Block::Title("CONTRAT DE LOCATION D'UN EMPLACEMENT DE STOCKAGE".into()),
        // ── La Société ──
        Block::SectionHeader("La Société".into()),
        Block::Paragraph(COMPANY_BOILERPLATE.into()),
        // ── Le Client ──
        Block::SectionHeader("Le Client".into()),
        Block::Paragraph(format!(
            "{} {}, demeurant {}, {} {}, {}, joignable au {} et à l'adresse {}, \
             ci-après dénommé(e) « le Client ».",
            customer.first_name,
            customer.last_name,
            customer.address,
            customer.postal_code,
            customer.city,
            customer.country,
            customer.phone,
            customer.email,
        )),
    ];

    // ── Le Centre de Stockage ──
    blocks.push(Block::SectionHeader("Le Centre de Stockage".into()));
    match &unit.center {
        Some(center) => blocks.push(Block::Paragraph(format!(
            "L'emplacement loué se situe dans le centre {}, {}, {} {}.",
            center.name, center.address, center.postal_code, center.city,
        ))),
        None => blocks.push(Block::Paragraph(
            "L'emplacement loué se situe dans le centre indiqué lors de la réservation.".into(),
        )),
    }

    // ── Conditions du Contrat ──
    blocks.push(Block::SectionHeader("Conditions du Contrat".into()));
    blocks.push(Block::KeyValue {
        label: "Numéro du box".into(),
        value: unit.box_number.clone(),
    });
    let surface = match unit.surface_m2 {
        Some(s) => format!("{s} m² / {} m³", unit.volume_m3),
        None => format!("{} m³", unit.volume_m3),
    };
    blocks.push(Block::KeyValue {
        label: "Surface / Volume".into(),
        value: surface,
    });
    blocks.push(Block::KeyValue {
        label: "Date de début".into(),
        value: format_date(ctx.start_date),
    });
    blocks.push(Block::KeyValue {
        label: "Loyer mensuel".into(),
        value: format_eur(unit.price_per_month),
    });
    blocks.push(Block::KeyValue {
        label: "Prix total de la période".into(),
        value: format_eur(ctx.total_price),
    });
    blocks.push(Block::KeyValue {
        label: "Durée".into(),
        value: format!("{} mois", ctx.duration_months),
    });
    blocks.push(Block::KeyValue {
        label: "Dépôt de garantie".into(),
        value: format_eur(SECURITY_DEPOSIT_EUR),
    });
    blocks.push(Block::KeyValue {
        label: "Frais de dossier".into(),
        value: format_eur(FILING_FEE_EUR),
    });

    // ── Signatures ──
    blocks.push(Block::Spacer { height_mm: 8.0 });
    blocks.push(Block::SignatureRow {
        stamp: record.stamp.clone(),
        signature: record.signature.as_ref().map(|s| s.image.clone()),
    });

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContractContext, CustomerDetails, StorageCenter, UnitSnapshot};
    use chrono::NaiveDate;

    fn record() -> ContractRecord {
        ContractRecord::new(ContractContext {
            customer: CustomerDetails {
                first_name: "Claire".into(),
                last_name: "Moreau".into(),
                email: "claire@example.fr".into(),
                phone: "+33612345678".into(),
                address: "14 rue des Lilas".into(),
                city: "Lyon".into(),
                postal_code: "69003".into(),
                country: "France".into(),
            },
            unit: UnitSnapshot {
                id: 42,
                box_number: "B-112".into(),
                volume_m3: 6.0,
                surface_m2: Some(3.0),
                price_per_month: 100.0,
                available: false,
                features: vec![],
                images: vec![],
                center: Some(StorageCenter {
                    id: 3,
                    name: "Stowly Lyon Part-Dieu".into(),
                    address: "8 avenue Georges Pompidou".into(),
                    city: "Lyon".into(),
                    postal_code: "69003".into(),
                }),
            },
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
            duration_months: 3,
            total_price: 320.0,
        })
    }

    fn section_headers(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::SectionHeader(title) => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sections_appear_in_legal_order() {
        let blocks = contract_blocks(&record());
        assert_eq!(
            section_headers(&blocks),
            [
                "La Société",
                "Le Client",
                "Le Centre de Stockage",
                "Conditions du Contrat"
            ]
        );
        assert!(matches!(blocks[0], Block::Letterhead { .. }));
        assert!(matches!(blocks[1], Block::AddressBlock { .. }));
        assert!(matches!(blocks[2], Block::Title(_)));
        assert!(matches!(blocks.last(), Some(Block::SignatureRow { .. })));
    }

    #[test]
    fn terms_rows_carry_formatted_values() {
        let blocks = contract_blocks(&record());
        let terms: Vec<(&str, &str)> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::KeyValue { label, value } => Some((label.as_str(), value.as_str())),
                _ => None,
            })
            .collect();

        assert_eq!(terms[0], ("Numéro du box", "B-112"));
        assert_eq!(terms[2], ("Date de début", "01/09/2026"));
        assert_eq!(terms[3], ("Loyer mensuel", "100€"));
        assert_eq!(terms[4], ("Prix total de la période", "320€"));
        assert_eq!(terms[5], ("Durée", "3 mois"));
        assert_eq!(terms[6], ("Dépôt de garantie", "150€"));
        assert_eq!(terms[7], ("Frais de dossier", "25€"));
    }

    #[test]
    fn signature_row_omits_missing_signature() {
        let blocks = contract_blocks(&record());
        match blocks.last() {
            Some(Block::SignatureRow { stamp, signature }) => {
                assert!(stamp.is_some(), "embedded stamp expected");
                assert!(signature.is_none());
            }
            other => panic!("expected SignatureRow, got {other:?}"),
        }
    }
}
