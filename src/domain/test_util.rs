use anyhow::anyhow;

/// Connectivity represents the "connected" state of an in-memory driven port and lets tests
/// simulate the store becoming unreachable.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not connect to the todo store!")),
        }
    }
}

/// FakeImplementation stands in for a single method on a mocked driving port. It records the
/// arguments of each call and hands back a preconfigured result, which is easier to work with
/// than mocking libraries when the trait has async methods.
///
/// * [Args] is the tuple of captured arguments for one call
/// * [Ret] is the method's return type
///
/// # Example
///
/// ```ignore
/// struct MockListService {
///     create_list_result: FakeImplementation<NewList, Result<TodoList, domain::Error>>,
/// }
///
/// impl ListPort for Mutex<MockListService> {
///     async fn create_list(&self, new_list: &NewList, /* ... */) -> Result<TodoList, domain::Error> {
///         let mut locked_self = self.lock().expect("mock list service mutex poisoned");
///         locked_self.create_list_result.save_arguments(new_list.clone());
///         locked_self.create_list_result.return_value_result()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    /// Creates a new FakeImplementation with no configured result
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value)
    }

    /// Retrieve a copy of the configured result
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(err.clone()),
            None => panic!("Tried to return from a function where the return value wasn't set!"),
        }
    }
}
