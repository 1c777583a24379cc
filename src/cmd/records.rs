use tagtree::record;

record! {
	/// Address-book entry populated from `USER_*` environment variables.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct User {
		pub name: String => r#"env:"USER_NAME" envDefault:"Lucien" json:"user_name""#,
		pub age: f32 => r#"env:"USER_AGE" envDefault:"23.5" json:"user_age""#,
		pub address: Address => r#"json:"address""#,
		#[allow(dead_code)]
		national_insurance: String,
	}
}

record! {
	/// Postal address with mandatory environment bindings.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Address {
		pub street: String => r#"env:"USER_ADDRESS_STREET,required" json:"user_address_street""#,
		pub city: String => r#"env:"USER_ADDRESS_CITY,required" json:"user_address_city""#,
		pub postcode: String => r#"env:"USER_ADDRESS_POSTCODE,required" json:"user_address_postcode""#,
		pub lat_lng: LatLng => r#"json:"latlng""#,
	}
}

record! {
	/// Coordinates with environment defaults.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct LatLng {
		pub lat: f64 => r#"env:"USER_ADDRESS_LAT" envDefault:"40.0000" json:"lat""#,
		pub lng: f64 => r#"env:"USER_ADDRESS_LNG" envDefault:"-115.1111" json:"lng""#,
	}
}

record! {
	/// Profile whose character fields travel as JSON strings.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Profile {
		pub name: String => r#"json:"user_name""#,
		pub age: f32 => r#"json:"user_age""#,
		pub note: Vec<char> => r#"json:"note""#,
		pub ni: Vec<i32> => r#"json:"ni""#,
		pub address: PostalAddress => r#"json:"address""#,
		#[allow(dead_code)]
		national_insurance: String,
	}
}

record! {
	/// Postal address with character-sequence street and city.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct PostalAddress {
		pub street: Vec<char> => r#"json:"user_address_street""#,
		pub city: Vec<char> => r#"json:"user_address_city""#,
		pub postcode: String => r#"json:"user_address_postcode""#,
		pub lat_lng: LatLng => r#"json:"latlng""#,
	}
}

impl Profile {
	/// Sample profile used by `tagtree encode`.
	pub fn sample() -> Self {
		Self {
			name: "Amy".to_owned(),
			age: 35.0,
			note: "Illustrator".chars().collect(),
			ni: vec![9, 8, 7, 6, 5, 4, 3, 2, 1],
			address: PostalAddress {
				street: "123 Tyttenhanger".chars().collect(),
				city: "St Albans".chars().collect(),
				postcode: "AL4".to_owned(),
				lat_lng: LatLng::default(),
			},
			national_insurance: "QQ123456C".to_owned(),
		}
	}
}
