use super::{EnvOptions, decode_env_with};
use crate::codec::{CodecError, ConversionRegistry, Environment, Shape};

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	pub struct Limits {
		pub retries: i8 => r#"env:"RETRIES" envDefault:"3""#,
		pub verbose: bool => r#"env:"VERBOSE""#,
		pub ratio: f32 => r#"envDefault:"0.5""#,
		pub port: u32 => r#"env:"PORT""#,
		pub label: String,
		secret: String => r#"env:"SECRET" envDefault:"hunter2""#,
	}
}

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	pub struct Service {
		pub name: String => r#"env:"SERVICE_NAME,required""#,
		pub limits: Limits,
		pub fallback: Option<Box<Limits>>,
	}
}

fn decode(target: &mut Service, pairs: &[(&str, &str)]) -> crate::codec::Result<()> {
	let env: Environment = pairs.iter().copied().collect();
	decode_env_with(target, &env, &ConversionRegistry::standard(), &EnvOptions::default())
}

#[test]
fn environment_value_overrides_default() {
	let mut service = Service::default();
	decode(&mut service, &[("SERVICE_NAME", "api"), ("RETRIES", "7"), ("VERBOSE", "true")]).expect("decode succeeds");
	assert_eq!(service.name, "api");
	assert_eq!(service.limits.retries, 7);
	assert!(service.limits.verbose);
}

#[test]
fn default_applies_without_binding_or_value() {
	let mut service = Service::default();
	decode(&mut service, &[("SERVICE_NAME", "api")]).expect("decode succeeds");
	assert_eq!(service.limits.retries, 3);
	assert_eq!(service.limits.ratio, 0.5);
}

#[test]
fn missing_value_without_default_leaves_field_unchanged() {
	let mut service = Service::default();
	service.limits.label = "kept".to_owned();
	decode(&mut service, &[("SERVICE_NAME", "api")]).expect("decode succeeds");
	assert!(!service.limits.verbose);
	assert_eq!(service.limits.label, "kept");
	assert_eq!(service.limits.port, 0);
}

#[test]
fn unexported_fields_are_skipped() {
	let mut service = Service::default();
	decode(&mut service, &[("SERVICE_NAME", "api"), ("SECRET", "leaked")]).expect("decode succeeds");
	assert_eq!(service.limits.secret, "");
}

#[test]
fn null_pointer_is_not_allocated() {
	let mut service = Service::default();
	decode(&mut service, &[("SERVICE_NAME", "api")]).expect("decode succeeds");
	assert!(service.fallback.is_none());
}

#[test]
fn non_null_pointer_is_decoded() {
	let mut service = Service {
		fallback: Some(Box::default()),
		..Service::default()
	};
	decode(&mut service, &[("SERVICE_NAME", "api"), ("RETRIES", "5")]).expect("decode succeeds");
	let fallback = service.fallback.expect("pointer stays allocated");
	assert_eq!(fallback.retries, 5);
	assert_eq!(fallback.ratio, 0.5);
}

#[test]
fn missing_required_value_fails() {
	let mut service = Service::default();
	let err = decode(&mut service, &[]).expect_err("required key missing");
	let CodecError::MissingRequiredEnv { field, key } = err else {
		panic!("expected missing env error, got {err:?}");
	};
	assert_eq!(field, "name");
	assert_eq!(key, "SERVICE_NAME");
}

#[test]
fn bad_value_names_field_and_raw() {
	let mut service = Service::default();
	let err = decode(&mut service, &[("SERVICE_NAME", "api"), ("RETRIES", "300")]).expect_err("out of range");
	let CodecError::FieldConversion { field, raw, shape } = err else {
		panic!("expected field conversion error, got {err:?}");
	};
	assert_eq!(field, "retries");
	assert_eq!(raw, "300");
	assert_eq!(shape, Shape::I8);
}

#[test]
fn unregistered_shape_fails_only_when_a_value_exists() {
	let mut service = Service::default();
	decode(&mut service, &[("SERVICE_NAME", "api")]).expect("port has no value");

	let err = decode(&mut service, &[("SERVICE_NAME", "api"), ("PORT", "8080")]).expect_err("u32 has no entry");
	assert!(matches!(err, CodecError::UnsupportedShape { shape: Shape::U32 }));
}

#[test]
fn fields_before_failure_stay_written() {
	let mut service = Service::default();
	let err = decode(&mut service, &[("SERVICE_NAME", "api"), ("VERBOSE", "yes")]).expect_err("bad bool");
	assert!(matches!(err, CodecError::FieldConversion { field: "verbose", .. }));
	assert_eq!(service.name, "api");
	assert_eq!(service.limits.retries, 3);
}

#[test]
fn depth_limit_is_enforced() {
	let mut service = Service::default();
	let env: Environment = [("SERVICE_NAME", "api")].into_iter().collect();
	let opt = EnvOptions {
		max_depth: 1,
		..EnvOptions::default()
	};
	let err = decode_env_with(&mut service, &env, &ConversionRegistry::standard(), &opt).expect_err("limits is depth 1");
	assert!(matches!(err, CodecError::DepthExceeded { type_name: "Limits", max_depth: 1 }));
}

#[test]
fn custom_annotation_names_are_honoured() {
	crate::record! {
		#[derive(Debug, Default)]
		pub struct Custom {
			pub host: String => r#"src:"HOST" fallback:"localhost""#,
		}
	}

	let mut custom = Custom::default();
	let opt = EnvOptions {
		tag: "src",
		default_tag: "fallback",
		..EnvOptions::default()
	};
	decode_env_with(&mut custom, &Environment::default(), &ConversionRegistry::standard(), &opt).expect("decode succeeds");
	assert_eq!(custom.host, "localhost");
}

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	pub struct Credentials {
		pub token: String => r#"env:"API_TOKEN,required" envDefault:"anonymous""#,
	}
}

#[test]
fn required_binding_ignores_default_annotation() {
	let mut credentials = Credentials::default();
	let env: Environment = [("OTHER", "x")].into_iter().collect();
	let err = decode_env_with(&mut credentials, &env, &ConversionRegistry::standard(), &EnvOptions::default())
		.expect_err("token is required");

	assert!(matches!(&err, CodecError::MissingRequiredEnv { field: "token", key } if key == "API_TOKEN"), "{err:?}");
	assert_eq!(credentials.token, "");
}
