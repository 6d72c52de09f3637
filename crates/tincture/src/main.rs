//! `tinct`: the tincture command line.

mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use rand::rngs::StdRng;
use serde_json::json;
use tincture_core::logging::{LogError, init_logging};
use tincture_core::{
    Color, ColorFactory, Config, ContrastOptions, Descriptor, Template, sort_colors,
};

use crate::args::{CliArguments, Command, GlobalArgs, OutputArgs};

fn main() -> ExitCode {
    let args = CliArguments::parse();
    match dispatch(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn print_error(err: &anyhow::Error) {
    eprintln!("error: {err:#}");
    if let Some(remediation) = err
        .downcast_ref::<tincture_core::Error>()
        .and_then(tincture_core::Error::remediation)
    {
        eprint!("{}", remediation.render_plain());
    }
}

/// Everything a command needs: merged settings and a factory built from them.
struct Session {
    config: Config,
    factory: ColorFactory<StdRng>,
    json: bool,
}

impl Session {
    fn open(global: &GlobalArgs) -> Result<Self> {
        let mut config = match &global.config {
            Some(path) => Config::load_from(path)?,
            None => Config::default(),
        };
        if let Some(precision) = global.precision {
            config.conversion.precision = precision;
        }
        if let Some(level) = &global.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(format) = global.log_format {
            config.logging.format = format;
        }
        config.validate()?;

        match init_logging(&config.logging) {
            Ok(()) | Err(LogError::AlreadyInitialized) => {}
            Err(err) => return Err(err).context("failed to initialize logging"),
        }

        let ctx = config.context();
        let factory = match global.seed {
            Some(seed) => ColorFactory::seeded(ctx, seed),
            None => ColorFactory::from_os_rng(ctx),
        };
        tracing::debug!(precision = ctx.precision, seeded = global.seed.is_some(), "session ready");

        Ok(Self {
            config,
            factory,
            json: global.json,
        })
    }

    fn descriptor(&self, input: &str) -> Result<Descriptor> {
        let trimmed = input.trim_start();
        if self.json || trimmed.starts_with('{') || trimmed.starts_with('[') {
            Descriptor::from_json_str(input)
                .with_context(|| format!("input is not valid JSON: {input}"))
        } else {
            Ok(Descriptor::from(input))
        }
    }

    /// Every color the inputs describe, collections flattened in order.
    fn colors(&mut self, inputs: &[String]) -> Result<Vec<Color>> {
        let mut out = Vec::new();
        for input in inputs {
            let descriptor = self.descriptor(input)?;
            out.extend(self.factory.resolve(descriptor)?.into_colors());
        }
        Ok(out)
    }

    fn color(&mut self, input: &str) -> Result<Color> {
        let descriptor = self.descriptor(input)?;
        Ok(self.factory.color(descriptor)?)
    }

    fn template(&self, output: &OutputArgs) -> Template {
        let text = match (&output.template, output.preset) {
            (Some(template), _) => template.as_str(),
            (None, Some(preset)) => preset.template(),
            (None, None) => self.config.template(),
        };
        Template::parse(text)
    }
}

fn dispatch(args: CliArguments) -> Result<()> {
    let mut session = Session::open(&args.global)?;

    match args.command {
        Command::Render(command) => {
            let template = session.template(&command.output);
            for color in session.colors(&command.inputs)? {
                println!("{}", template.render(&color)?);
            }
        }
        Command::Inspect(command) => {
            let descriptor = session.descriptor(&command.input)?;
            let colors = session.factory.resolve(descriptor)?.into_colors();
            let views: Vec<_> = colors.iter().map(inspect).collect();
            let out = match views.as_slice() {
                [single] => single.clone(),
                _ => serde_json::Value::Array(views),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Sort(command) => {
            let template = session.template(&command.output);
            let mut colors = session.colors(&command.inputs)?;
            sort_colors(&mut colors, command.by);
            if command.reverse {
                colors.reverse();
            }
            for color in &colors {
                println!("{}", template.render(color)?);
            }
        }
        Command::Average(command) => {
            let template = session.template(&command.output);
            let colors = session.colors(&command.inputs)?;
            let mean = Color::mean(&colors).context("no colors to average")?;
            println!("{}", template.render(&mean)?);
        }
        Command::Contrast(command) => {
            let template = session.template(&command.output);
            let color = session.color(&command.input)?;
            let contrast = color.contrast_color(ContrastOptions {
                saturation: command.saturation,
                min_brightness: command.min_brightness,
                hue_offset: command.hue_offset,
                limit: command.limit,
            });
            println!("{}", template.render(&contrast)?);
        }
    }

    Ok(())
}

fn inspect(color: &Color) -> serde_json::Value {
    json!({
        "hex": color.to_string(),
        "float": color.to_float(),
        "rgb": color.to_rgb(),
        "hsv": color.to_hsv(),
        "cmyk": color.to_cmyk(),
        "gray": color.is_gray(),
        "length": color.length(),
    })
}
