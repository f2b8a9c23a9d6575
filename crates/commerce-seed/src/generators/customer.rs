//! Customer generation.

use fake::{
    Fake,
    faker::{
        address::en::{BuildingNumber, CityName, CountryName, StreetName},
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
};
use rand::Rng;
use uuid::Uuid;

/// Generated customer ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedCustomer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Generates customers with realistic names and contact details.
#[derive(Debug, Clone)]
pub struct CustomerGenerator {
    email_domain: String,
}

impl CustomerGenerator {
    pub fn new() -> Self {
        Self {
            email_domain: "example.com".to_string(),
        }
    }

    /// Uses a different domain for generated emails.
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    /// Generates a single customer.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedCustomer {
        let id = Uuid::new_v4();
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let phone: String = PhoneNumber().fake_with_rng(rng);

        let building: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let country: String = CountryName().fake_with_rng(rng);

        GeneratedCustomer {
            id,
            first_name,
            last_name,
            // The email embeds the id, so it is unique whenever the id is
            email: format!("customer_{}@{}", id.simple(), self.email_domain),
            phone,
            address: format!("{building} {street}, {city}, {country}"),
        }
    }

    /// Generates multiple customers.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedCustomer> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl Default for CustomerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
