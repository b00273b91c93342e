use anyhow::Result;
use owo_colors::OwoColorize;
use steme_core::config::StemeConfig;

pub fn run(init: bool) -> Result<()> {
    let config_path = StemeConfig::config_path()?;

    if init {
        if config_path.exists() {
            anyhow::bail!("Config already exists at {}", config_path.display());
        }
        StemeConfig::create_default_config(&config_path)?;
        println!("{} {}", "Created".green(), config_path.display());
        return Ok(());
    }

    let config = StemeConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("{}", "Calendar".bold());
    println!("  First day:        {}", config.locale().day_name_short(config.calendar().first_day));
    println!(
        "  Block disabled:   {}",
        config.calendar().disable_all_touch_events_for_disabled_days
    );
    println!("{}", "Profile".bold());
    println!(
        "  Avatars:          {}",
        config
            .identity()
            .avatar_base_url
            .as_deref()
            .unwrap_or("(none)")
    );
    println!("  Fetch timeout:    {}s", config.identity().fetch_timeout_secs);

    Ok(())
}
