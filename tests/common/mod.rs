#![allow(dead_code)]

use tagtree::codec::Environment;
use tagtree::record;

record! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct User {
		pub name: String => r#"env:"USER_NAME" envDefault:"Lucien" json:"user_name""#,
		pub age: f32 => r#"env:"USER_AGE" envDefault:"23.5" json:"user_age""#,
		pub address: Address,
		national_insurance: String => r#"env:"USER_NI" envDefault:"unset""#,
	}
}

record! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Address {
		pub street: String => r#"env:"USER_ADDRESS_STREET,required""#,
		pub city: String => r#"env:"USER_ADDRESS_CITY,required""#,
		pub postcode: String => r#"env:"USER_ADDRESS_POSTCODE,required""#,
		pub lat_lng: LatLng,
	}
}

record! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct LatLng {
		pub lat: f64 => r#"env:"USER_ADDRESS_LAT" envDefault:"40.0000" json:"lat""#,
		pub lng: f64 => r#"env:"USER_ADDRESS_LNG" envDefault:"-115.1111" json:"lng""#,
	}
}

record! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Profile {
		pub name: String => r#"json:"user_name""#,
		pub age: f32 => r#"json:"user_age""#,
		pub note: Vec<char> => r#"json:"note""#,
		pub ni: Vec<i32> => r#"json:"ni""#,
		pub address: PostalAddress => r#"json:"address""#,
		pub verified: bool => r#"json:"verified""#,
		pub password: String => r#"json:"-""#,
		pub previous: Option<Box<PostalAddress>> => r#"json:"previous""#,
		national_insurance: String,
	}
}

record! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct PostalAddress {
		pub street: Vec<char> => r#"json:"user_address_street""#,
		pub city: Vec<char> => r#"json:"user_address_city""#,
		pub postcode: String => r#"json:"user_address_postcode""#,
		pub lat_lng: LatLng => r#"json:"latlng""#,
	}
}

impl User {
	pub fn national_insurance(&self) -> &str {
		&self.national_insurance
	}
}

impl Profile {
	pub fn with_national_insurance(mut self, value: &str) -> Self {
		self.national_insurance = value.to_owned();
		self
	}
}

pub fn chars(text: &str) -> Vec<char> {
	text.chars().collect()
}

pub fn amy() -> Profile {
	Profile {
		name: "Amy".to_owned(),
		age: 35.0,
		note: chars("Illustrator"),
		ni: vec![9, 8, 7, 6, 5, 4, 3, 2, 1],
		address: PostalAddress {
			street: chars("123 Tyttenhanger"),
			city: chars("St Albans"),
			postcode: "AL4".to_owned(),
			lat_lng: LatLng { lat: 51.7634, lng: -0.2979 },
		},
		verified: true,
		password: String::new(),
		previous: Some(Box::new(PostalAddress {
			street: chars("2A Matheson Road"),
			city: chars("London"),
			postcode: "W14".to_owned(),
			lat_lng: LatLng::default(),
		})),
		national_insurance: String::new(),
	}
}

pub fn snapshot(pairs: &[(&str, &str)], without: &[&str]) -> Environment {
	tagtree_testkit::env_pairs(pairs, without).into_iter().collect()
}
