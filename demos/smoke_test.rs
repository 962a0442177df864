//! Smoke test: Drive a headless scene and print what each frame did.
//!
//! Pass `-v` to see the per-frame trace logs on stderr:
//! `cargo run --example smoke_test -- -v`

use scenebox::{
    PixelBuffer, RasterOp, Recorder, Rect, Rgba, Scene, SceneEventKind,
    SoftwareBackend, Update,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let verbose = std::env::args().any(|arg| arg == "-v");
    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    println!("SceneBox Smoke Test");
    println!("===================");
    println!();

    let mut scene = Scene::new(Recorder::new(SoftwareBackend::new(100, 100)));
    scene.on(SceneEventKind::ObjectRemoved, |event| println!("event: {event:?}"));

    let fill = |props: &scenebox::PaintProps<'_, Rgba>, cache: &mut PixelBuffer| {
        cache.fill(*props.attrs);
    };
    let a = scene.add(Rect::new(0.0, 0.0, 20.0, 20.0), Rgba::from_u32(0xE0_4040), fill)?;
    let b = scene.add(Rect::new(10.0, 10.0, 20.0, 20.0), Rgba::from_u32(0x40_60E0), fill)?;
    println!("Added {a} and {b}");

    frame(&mut scene, "initial draw");
    frame(&mut scene, "nothing changed");

    scene.update(b, Update::new().x(40.0))?;
    frame(&mut scene, "move b (cache reused)");

    scene.update(a, Update::new().size(30.0, 10.0))?;
    frame(&mut scene, "resize a (repaint)");

    scene.remove(b)?;
    frame(&mut scene, "remove b");

    let surface = scene.backend().inner().surface();
    println!();
    println!("Pixel (5, 5):   {:?}", surface.get(5, 5));
    println!("Pixel (45, 15): {:?}", surface.get(45, 15));
    println!();
    println!("Average frame: {:?}", scene.timer().average());
    Ok(())
}

fn frame(scene: &mut Scene<Recorder<SoftwareBackend>, Rgba>, label: &str) {
    let report = scene.draw();
    let ops = scene.backend_mut().take_ops();

    println!("-- {label}");
    let Some(report) = report else {
        println!("   no-op ({} raster calls)", ops.len());
        return;
    };
    println!(
        "   frame {}: dirty {}, affected {}, repainted {}, cleared {:?}",
        report.frame, report.dirty, report.affected, report.repainted, report.cleared
    );
    for op in ops {
        match op {
            RasterOp::Clear(region) => println!("   clear {region:?}"),
            RasterOp::Blit { src, dst, .. } => println!("   blit  {src:?} -> {dst:?}"),
        }
    }
}
