use std::{path::PathBuf, process::ExitCode, time::Instant};

use glow::HasContext;
use log::{error, info};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use learngl::{
    abs::App,
    config::Config,
    lessons::{FrameContext, LessonKind, build_lesson},
    logging,
};

const USAGE: &str = "usage: learngl [lesson] [--config <path>] [--list]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    lesson: Option<LessonKind>,
    config: Option<PathBuf>,
    list: bool,
    help: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--list" | "-l" => parsed.list = true,
                "--help" | "-h" => parsed.help = true,
                flag if flag.starts_with('-') => return Err(format!("Unknown option `{}`", flag)),
                name => {
                    if parsed.lesson.is_some() {
                        return Err(format!("Unexpected argument `{}`", name));
                    }
                    parsed.lesson = Some(name.parse()?);
                }
            }
        }
        Ok(parsed)
    }
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    if args.list {
        for kind in LessonKind::ALL {
            println!("{:<14} {}", kind.name(), kind.description());
        }
        return ExitCode::SUCCESS;
    }

    let (config, config_path) = match Config::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(config.log_level()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match &config_path {
        Some(path) => info!("Using config {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match run(&config, args.lesson) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, lesson: Option<LessonKind>) -> Result<(), Box<dyn std::error::Error>> {
    let kind = match lesson {
        Some(kind) => kind,
        None => config.lesson.parse()?,
    };

    let mut app = App::new(&config.window)?;
    info!(
        "Opened {}x{} window \"{}\"",
        config.window.width, config.window.height, config.window.title
    );

    let mut lesson = build_lesson(kind, &app.gl, config)?;
    let mut wireframe = config.wireframe;
    let [r, g, b, a] = config.clear_color;
    let start = Instant::now();

    'running: loop {
        let events: Vec<Event> = app.event_pump.poll_iter().collect();
        for event in &events {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => app.fit_viewport(),
                Event::KeyDown {
                    keycode: Some(Keycode::W),
                    repeat: false,
                    ..
                } => {
                    wireframe = !wireframe;
                    info!("Wireframe {}", if wireframe { "on" } else { "off" });
                }
                _ => {}
            }
            lesson.handle_event(event);
        }

        unsafe {
            app.gl.polygon_mode(
                glow::FRONT_AND_BACK,
                if wireframe { glow::LINE } else { glow::FILL },
            );
            app.gl.clear_color(r, g, b, a);
            app.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let frame = FrameContext {
            elapsed: start.elapsed().as_secs_f32(),
        };
        lesson.render(&frame);
        app.swap();
    }

    info!("Closing lesson `{}`", kind);
    Ok(())
}
