//! Runs the demo site headlessly and prints every page it visits.

use anyhow::Result;
use waypoint::prelude::*;
use waypoint_headless::HeadlessHost;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    waypoint::logging::init(&config.log_level);

    let mut builder = AppBuilder::from_config(config);
    waypoint_demo::install(&mut builder);

    let host = HeadlessHost::with_root_id(&builder.config().root_id, waypoint_demo::BASE_PATH);
    let root = host.root();
    let history = host.history();
    let (document, mount, router_history) = host.into_parts();

    let app = builder.build(document, mount, router_history);
    app.init()?;
    println!("{}  {}", history.location(), root.to_html());

    for path in ["/about", "/contact", "/missing"] {
        app.navigate_to(path)?;
        println!("{}  {}", history.location(), root.to_html());
    }

    while history.back()? {
        println!("{}  {}", history.location(), root.to_html());
    }

    let obj = props! {
        "foo" => props! { "bar" => props! { "baz" => "Hello, world!" } },
    };
    if let Some(value) = lookup(&obj, "foo.bar.baz") {
        println!("{value}");
    }

    let animal = props! { "type" => props! { "name" => "dog" } };
    println!("{}", interpolate("Type of animal: {{ type.name }}", &animal));

    let string_value = Value::from("Hello");
    let number_value = Value::from(42);
    println!("{}", is_type(&string_value, "string"));
    println!("{}", is_type(&number_value, "number"));
    println!("{}", is_type(&string_value, "number"));

    tracing::info!("demo finished");
    Ok(())
}
