use macroquad::window::Conf;

fn window_conf() -> Conf {
    Conf {
        window_title: "Robotoy".to_owned(),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    robotoy_web_lib::run().await;
}
