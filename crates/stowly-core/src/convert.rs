// ── Wire → domain conversions ──
//
// The api crate's response structs never leak past this module.

use stowly_api::types::{
    BookingContextResponse, CustomerProfileResponse, ServiceResponse, StorageCenterResponse,
    UnitResponse,
};

use crate::model::{
    AddOnService, ContractContext, CustomerDetails, StorageCenter, UnitSnapshot,
};

impl From<StorageCenterResponse> for StorageCenter {
    fn from(c: StorageCenterResponse) -> Self {
        Self {
            id: c.id,
            name: c.name,
            address: c.address,
            city: c.city,
            postal_code: c.postal_code,
        }
    }
}

impl From<UnitResponse> for UnitSnapshot {
    fn from(u: UnitResponse) -> Self {
        Self {
            id: u.id,
            box_number: u.name,
            volume_m3: u.volume,
            surface_m2: u.surface,
            price_per_month: u.price_per_month,
            available: u.available,
            features: u.features,
            images: u.images,
            center: u.storage_center.map(StorageCenter::from),
        }
    }
}

impl From<ServiceResponse> for AddOnService {
    fn from(s: ServiceResponse) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            price: s.price,
        }
    }
}

impl From<CustomerProfileResponse> for CustomerDetails {
    fn from(p: CustomerProfileResponse) -> Self {
        Self {
            first_name: p.first_name.unwrap_or_default(),
            last_name: p.last_name.unwrap_or_default(),
            email: p.email.unwrap_or_default(),
            phone: p.phone.unwrap_or_default(),
            address: p.address.unwrap_or_default(),
            city: p.city.unwrap_or_default(),
            postal_code: p.postal_code.unwrap_or_default(),
            country: p.country.unwrap_or_default(),
        }
    }
}

impl From<BookingContextResponse> for ContractContext {
    fn from(b: BookingContextResponse) -> Self {
        Self {
            customer: b.customer.into(),
            unit: b.unit.into(),
            start_date: b.start_date,
            duration_months: b.duration_months,
            total_price: b.total_price,
        }
    }
}
