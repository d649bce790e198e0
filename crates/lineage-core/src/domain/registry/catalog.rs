//! Built-in collection catalog
//!
//! The archive's historical-record collections as shipped. Deployments can
//! replace this list with a TOML catalog (see [`super::CollectionRegistry::load`]).

use super::descriptor::{CollectionDescriptor, RoleHints};

/// Collections searched by the correlation engine, in search order
pub const CROSS_REFERENCED: &[&str] = &[
    "freedmens-bureau",
    "freedmens-bank",
    "runaway-ads",
    "slave-manifests",
    "usct-service",
    "cohabitation-registers",
    "emancipation-petitions",
    "bills-of-sale",
    "manumissions",
    "census-1870",
    "free-registers",
    "southern-claims",
];

fn hints(f: impl FnOnce(&mut RoleHints)) -> RoleHints {
    let mut roles = RoleHints::default();
    f(&mut roles);
    roles
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Unresolved descriptors for the built-in catalog
pub fn builtin_descriptors() -> Vec<CollectionDescriptor> {
    vec![
        CollectionDescriptor::new("freedmens_bureau", "Freedmen's Bureau Records", "freedmens-bureau")
            .with_columns(&["id", "name", "age", "location", "state", "former_enslaver", "date", "notes"])
            .with_searchable(&["name", "former_enslaver", "location", "notes"])
            .with_display(&["name", "age", "location", "date"])
            .with_identifier(&["name", "location"])
            .with_roles(hints(|r| r.enslaver = list(&["former_enslaver"]))),
        CollectionDescriptor::new("slave_schedules_1850", "1850 Slave Schedules", "slave-schedules-1850")
            .with_columns(&["id", "enslaver", "location", "state", "age", "sex", "color", "year"])
            .with_searchable(&["enslaver", "location"])
            .with_display(&["enslaver", "age", "sex", "location"])
            .with_identifier(&["enslaver", "location"]),
        CollectionDescriptor::new("slave_schedules_1860", "1860 Slave Schedules", "slave-schedules-1860")
            .with_columns(&["id", "enslaver", "location", "state", "age", "sex", "color", "year"])
            .with_searchable(&["enslaver", "location"])
            .with_display(&["enslaver", "age", "sex", "location"])
            .with_identifier(&["enslaver", "location"]),
        CollectionDescriptor::new("runaway_ads", "Runaway Slave Advertisements", "runaway-ads")
            .with_columns(&["id", "name", "age", "owner", "location", "state", "date", "reward", "description"])
            .with_searchable(&["name", "owner", "location", "description"])
            .with_display(&["name", "owner", "reward", "date"])
            .with_identifier(&["name", "date"]),
        CollectionDescriptor::new("slave_manifests", "Coastwise Slave Manifests", "slave-manifests")
            .with_columns(&["id", "name", "age", "sex", "ship_name", "port", "owner_name", "date"])
            .with_searchable(&["name", "ship_name", "owner_name", "port"])
            .with_display(&["name", "age", "ship_name", "port", "date"])
            .with_identifier(&["name", "ship_name"]),
        CollectionDescriptor::new("usct_service_records", "U.S. Colored Troops Service Records", "usct-service")
            .with_columns(&["id", "first_name", "last_name", "age", "regiment", "rank", "state", "location", "enlistment_date", "former_enslaver"])
            .with_searchable(&["first_name", "last_name", "regiment", "location"])
            .with_display(&["first_name", "last_name", "regiment", "rank"])
            .with_identifier(&["first_name", "last_name", "regiment"])
            .with_roles(hints(|r| {
                r.name = Some("last_name".to_string());
                r.enslaver = list(&["former_enslaver"]);
                r.date = list(&["enlistment_date"]);
            })),
        CollectionDescriptor::new("freedmens_bank_records", "Freedman's Bank Records", "freedmens-bank")
            .with_columns(&["id", "name", "age", "location", "state", "master", "date_registered", "family_members"])
            .with_searchable(&["name", "master", "location", "family_members"])
            .with_display(&["name", "age", "location", "date_registered"])
            .with_identifier(&["name", "location"]),
        CollectionDescriptor::new("cohabitation_registers", "Cohabitation Registers", "cohabitation-registers")
            .with_columns(&["id", "husband_name", "wife_name", "county", "state", "owner", "date"])
            .with_searchable(&["husband_name", "wife_name", "county", "owner"])
            .with_display(&["husband_name", "wife_name", "county", "date"])
            .with_identifier(&["husband_name", "wife_name"])
            .with_roles(hints(|r| r.name = Some("husband_name".to_string()))),
        CollectionDescriptor::new("emancipation_petitions", "D.C. Emancipation Petitions", "emancipation-petitions")
            .with_columns(&["id", "name", "age", "claimant", "location", "date", "valuation"])
            .with_searchable(&["name", "claimant", "location"])
            .with_display(&["name", "age", "claimant", "valuation"])
            .with_identifier(&["name", "claimant"]),
        CollectionDescriptor::new("compensation_claims", "Slave Compensation Claims", "compensation-claims")
            .with_columns(&["id", "name", "claimant", "location", "state", "year", "amount"])
            .with_searchable(&["name", "claimant", "location"])
            .with_display(&["claimant", "name", "amount", "year"])
            .with_identifier(&["claimant", "year"]),
        CollectionDescriptor::new("plantation_records", "Plantation Records", "plantation-records")
            .with_columns(&["id", "name", "owner", "plantation", "location", "state", "year", "occupation"])
            .with_searchable(&["name", "owner", "plantation", "location"])
            .with_display(&["name", "plantation", "owner", "year"])
            .with_identifier(&["name", "plantation"]),
        CollectionDescriptor::new("bills_of_sale", "Bills of Sale", "bills-of-sale")
            .with_columns(&["id", "name", "age", "owner_name", "buyer", "location", "price", "date"])
            .with_searchable(&["name", "owner_name", "buyer", "location"])
            .with_display(&["name", "owner_name", "buyer", "price", "date"])
            .with_identifier(&["name", "date"]),
        CollectionDescriptor::new("probate_inventories", "Probate Inventories", "probate-inventories")
            .with_columns(&["id", "name", "age", "owner", "location", "appraised_value", "date"])
            .with_searchable(&["name", "owner", "location"])
            .with_display(&["name", "owner", "appraised_value"])
            .with_identifier(&["owner", "name"]),
        CollectionDescriptor::new("wills", "Wills and Bequests", "wills")
            .with_columns(&["id", "name", "testator", "beneficiary", "location", "date"])
            .with_searchable(&["name", "testator", "beneficiary", "location"])
            .with_display(&["testator", "name", "beneficiary", "date"])
            .with_identifier(&["testator", "date"])
            .with_roles(hints(|r| r.enslaver = list(&["testator"]))),
        CollectionDescriptor::new("church_records", "Church Records", "church-records")
            .with_columns(&["id", "name", "church", "denomination", "location", "master", "date"])
            .with_searchable(&["name", "church", "location"])
            .with_display(&["name", "church", "denomination", "date"])
            .with_identifier(&["name", "church"]),
        CollectionDescriptor::new("census_1870", "1870 Federal Census", "census-1870")
            .with_columns(&["id", "first_name", "last_name", "age", "location", "state", "occupation", "year"])
            .with_searchable(&["first_name", "last_name", "location"])
            .with_display(&["first_name", "last_name", "age", "location"])
            .with_identifier(&["first_name", "last_name", "location"])
            .with_roles(hints(|r| r.name = Some("last_name".to_string()))),
        CollectionDescriptor::new("census_1880", "1880 Federal Census", "census-1880")
            .with_columns(&["id", "first_name", "last_name", "age", "location", "state", "occupation", "year"])
            .with_searchable(&["first_name", "last_name", "location"])
            .with_display(&["first_name", "last_name", "age", "location"])
            .with_identifier(&["first_name", "last_name", "location"])
            .with_roles(hints(|r| r.name = Some("last_name".to_string()))),
        CollectionDescriptor::new("free_negro_registers", "Free Registers", "free-registers")
            .with_columns(&["id", "name", "age", "complexion", "location", "state", "date_registered"])
            .with_searchable(&["name", "location"])
            .with_display(&["name", "age", "complexion", "date_registered"])
            .with_identifier(&["name", "date_registered"]),
        CollectionDescriptor::new("manumission_records", "Manumission Records", "manumissions")
            .with_columns(&["id", "name", "age", "owner", "location", "state", "date"])
            .with_searchable(&["name", "owner", "location"])
            .with_display(&["name", "owner", "date"])
            .with_identifier(&["name", "owner"]),
        CollectionDescriptor::new("marriage_records", "Marriage Records", "marriages")
            .with_columns(&["id", "name", "spouse_name", "location", "state", "date", "officiant"])
            .with_searchable(&["name", "spouse_name", "location"])
            .with_display(&["name", "spouse_name", "date"])
            .with_identifier(&["name", "spouse_name"]),
        CollectionDescriptor::new("death_records", "Death Records", "deaths")
            .with_columns(&["id", "name", "age", "location", "state", "cause", "date"])
            .with_searchable(&["name", "location"])
            .with_display(&["name", "age", "cause", "date"])
            .with_identifier(&["name", "date"]),
        CollectionDescriptor::new("voter_registrations_1867", "1867 Voter Registrations", "voter-registrations-1867")
            .with_columns(&["id", "name", "location", "state", "registration_date", "years_in_state"])
            .with_searchable(&["name", "location"])
            .with_display(&["name", "location", "registration_date"])
            .with_identifier(&["name", "location"]),
        CollectionDescriptor::new("land_records", "Land and Homestead Records", "land-records")
            .with_columns(&["id", "name", "location", "state", "acreage", "date"])
            .with_searchable(&["name", "location"])
            .with_display(&["name", "location", "acreage", "date"])
            .with_identifier(&["name", "location"]),
        CollectionDescriptor::new("court_records", "Court Records", "court-records")
            .with_columns(&["id", "name", "master", "location", "case_type", "date"])
            .with_searchable(&["name", "master", "location", "case_type"])
            .with_display(&["name", "case_type", "date"])
            .with_identifier(&["name", "case_type"]),
        CollectionDescriptor::new("newspaper_notices", "Newspaper Notices", "newspaper-notices")
            .with_columns(&["id", "name", "newspaper", "location", "date", "text"])
            .with_searchable(&["name", "newspaper", "location", "text"])
            .with_display(&["name", "newspaper", "date"])
            .with_identifier(&["newspaper", "date"]),
        CollectionDescriptor::new("ship_passenger_lists", "Ship Passenger Lists", "passenger-lists")
            .with_columns(&["id", "name", "age", "ship_name", "port", "date"])
            .with_searchable(&["name", "ship_name", "port"])
            .with_display(&["name", "age", "ship_name", "date"])
            .with_identifier(&["name", "ship_name"]),
        CollectionDescriptor::new("pension_files", "Civil War Pension Files", "pension-files")
            .with_columns(&["id", "name", "regiment", "state", "age", "date"])
            .with_searchable(&["name", "regiment"])
            .with_display(&["name", "regiment", "date"])
            .with_identifier(&["name", "regiment"]),
        CollectionDescriptor::new("southern_claims", "Southern Claims Commission", "southern-claims")
            .with_columns(&["id", "name", "claimant", "location", "state", "year", "amount"])
            .with_searchable(&["name", "claimant", "location"])
            .with_display(&["claimant", "location", "amount", "year"])
            .with_identifier(&["claimant", "location"]),
        CollectionDescriptor::new("military_impressment", "Confederate Impressment Records", "impressment")
            .with_columns(&["id", "name", "owner", "location", "state", "date"])
            .with_searchable(&["name", "owner", "location"])
            .with_display(&["name", "owner", "date"])
            .with_identifier(&["name", "owner"]),
        CollectionDescriptor::new("oral_histories", "WPA Slave Narratives", "oral-histories")
            .with_columns(&["id", "name", "age", "location", "state", "interviewer", "year", "summary"])
            .with_searchable(&["name", "location", "interviewer", "summary"])
            .with_display(&["name", "age", "location", "year"])
            .with_identifier(&["name", "location"]),
    ]
}
