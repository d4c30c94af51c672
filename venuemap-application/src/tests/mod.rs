pub mod prelude {
    use std::{
        cell::RefCell,
        collections::HashMap,
        io,
        sync::atomic::{AtomicUsize, Ordering},
    };
    use venuemap_core::{
        gateways::{
            document::DocumentGateway,
            file::FileGateway,
            geocode::{GeoCodingGateway, GeocodingError},
            render::RenderingSurface,
        },
        repositories::{self, CircleRepo},
        state::{MapConfig, MapState},
        usecases::Document,
    };

    pub use venuemap_core::{entities::*, gateways::render::RenderInstruction};
    pub use venuemap_entities::builders::*;

    pub type TestState = MapState<RecordingSurface, MemoryStore>;

    /// A state with a fresh store and without the initial rendering.
    pub fn new_state(venues: Vec<Venue>) -> TestState {
        let state = MapState::new(
            MapConfig::default(),
            venues,
            RecordingSurface::default(),
            MemoryStore::default(),
        )
        .unwrap();
        state.surface().take();
        state
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub rendered: RefCell<Vec<RenderInstruction>>,
    }

    impl RecordingSurface {
        pub fn take(&self) -> Vec<RenderInstruction> {
            self.rendered.take()
        }
    }

    impl RenderingSurface for RecordingSurface {
        fn render(&self, instruction: RenderInstruction) {
            self.rendered.borrow_mut().push(instruction);
        }
        fn view_center(&self) -> MapPoint {
            MapPoint::from_lat_lng_deg(51.5, -0.1)
        }
    }

    #[derive(Default)]
    pub struct MemoryStore {
        snapshot: RefCell<Option<Vec<CircleSnapshot>>>,
    }

    impl MemoryStore {
        pub fn stored(&self) -> Option<Vec<CircleSnapshot>> {
            self.snapshot.borrow().clone()
        }
    }

    impl CircleRepo for MemoryStore {
        fn load_circle_snapshot(&self) -> repositories::Result<Option<Vec<CircleSnapshot>>> {
            Ok(self.stored())
        }
        fn save_circle_snapshot(&self, circles: &[CircleSnapshot]) -> repositories::Result<()> {
            *self.snapshot.borrow_mut() = Some(circles.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemoryFiles {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MemoryFiles {
        pub fn put(&self, file_name: &str, bytes: &[u8]) {
            self.files
                .borrow_mut()
                .insert(file_name.to_owned(), bytes.to_vec());
        }
    }

    impl FileGateway for MemoryFiles {
        fn save_as(&self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
            self.put(file_name, bytes);
            Ok(())
        }
        fn open(&self, file_name: &str) -> io::Result<Vec<u8>> {
            self.files
                .borrow()
                .get(file_name)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    #[derive(Default)]
    pub struct MemoryDocuments {
        pub produced: RefCell<Vec<(String, Document)>>,
    }

    impl DocumentGateway for MemoryDocuments {
        fn produce(&self, file_name: &str, document: &Document) -> io::Result<()> {
            self.produced
                .borrow_mut()
                .push((file_name.to_owned(), document.clone()));
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct FakeGeocoder {
        known: HashMap<String, (f64, f64)>,
        unavailable: Vec<String>,
        panicking: Vec<String>,
        requests: AtomicUsize,
    }

    impl FakeGeocoder {
        pub fn with(mut self, address: &str, pos: (f64, f64)) -> Self {
            self.known.insert(address.to_owned(), pos);
            self
        }
        pub fn unavailable(mut self, address: &str) -> Self {
            self.unavailable.push(address.to_owned());
            self
        }
        pub fn panicking(mut self, address: &str) -> Self {
            self.panicking.push(address.to_owned());
            self
        }
        pub fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl GeoCodingGateway for FakeGeocoder {
        fn resolve_address_lat_lng(
            &self,
            addr: &str,
        ) -> Result<Option<(f64, f64)>, GeocodingError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.panicking.iter().any(|a| a == addr) {
                panic!("lookup of {addr} crashed");
            }
            if self.unavailable.iter().any(|a| a == addr) {
                return Err(GeocodingError::Unavailable("rate limited".into()));
            }
            Ok(self.known.get(addr).copied())
        }
    }
}
